//! 命令行集成测试

use std::fs;
use std::path::Path;

use assert_cmd::Command;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::TestDictionaries;

const PAGE: &str = r#"<html><head><title>Hello World</title></head><body><h1 lang="en">Hello World</h1><p lang="en">bye</p></body></html>"#;

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();
    TestDictionaries::write_to(&dir.path().join("languages"));
    dir
}

fn langswitch(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("langswitch").unwrap();
    cmd.current_dir(dir)
        .env("LANGSWITCH_LOG_LEVEL", "error")
        .env("NO_COLOR", "1")
        .env_remove("LANGSWITCH_PATH")
        .env_remove("LANGSWITCH_LANG")
        .env_remove("LANGSWITCH_DEFAULT_LANG");
    cmd
}

#[cfg(test)]
mod passing {
    use super::*;

    #[test]
    fn translates_file_to_stdout() {
        let dir = workspace();
        let out = langswitch(dir.path())
            .args(["index.html", "--lang", "es"])
            .assert()
            .success();

        let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
        assert!(stdout.contains(r#"<h1 lang="es">Hola Mundo</h1>"#));
        assert!(stdout.contains(r#"<p lang="es">Adios</p>"#));
    }

    #[test]
    fn writes_output_path_with_substitutions() {
        let dir = workspace();
        langswitch(dir.path())
            .args(["index.html", "-l", "fr", "-o", "%title%.%lang%.html"])
            .assert()
            .success();

        // 标题不在 lang 元素中，保持原文
        let written = fs::read_to_string(dir.path().join("Hello World.fr.html")).unwrap();
        assert!(written.contains("Bonjour le monde"));
    }

    #[test]
    fn dictionary_path_can_be_given_explicitly() {
        let dir = workspace();
        fs::rename(dir.path().join("languages"), dir.path().join("i18n")).unwrap();

        let out = langswitch(dir.path())
            .args(["index.html", "--lang", "es", "--path", "i18n"])
            .assert()
            .success();

        assert!(String::from_utf8_lossy(&out.get_output().stdout).contains("Hola Mundo"));
    }

    #[test]
    fn prints_environment_documentation() {
        let out = Command::cargo_bin("langswitch")
            .unwrap()
            .arg("--print-env-docs")
            .assert()
            .success();

        assert!(String::from_utf8_lossy(&out.get_output().stdout).contains("LANGSWITCH_LANG"));
    }
}

#[cfg(test)]
mod failing {
    use super::*;

    #[test]
    fn missing_dictionary_exits_with_error() {
        let dir = workspace();
        let out = langswitch(dir.path())
            .args(["index.html", "--lang", "xx"])
            .assert()
            .failure()
            .code(1);

        let stderr = String::from_utf8_lossy(&out.get_output().stderr).into_owned();
        assert!(stderr.contains("Error loading language: xx"));
        assert!(out.get_output().stdout.is_empty());
    }

    #[test]
    fn missing_input_file_exits_with_error() {
        let dir = workspace();
        langswitch(dir.path())
            .args(["nope.html", "--lang", "es"])
            .assert()
            .failure()
            .code(1);
    }

    #[test]
    fn invalid_observe_selector_is_rejected() {
        let dir = workspace();
        let out = langswitch(dir.path())
            .args(["index.html", "--lang", "es", "--observe", "div > p"])
            .assert()
            .failure()
            .code(1);

        assert!(String::from_utf8_lossy(&out.get_output().stderr).contains("Error"));
    }
}
