//! 语言持久化集成测试
//!
//! 使用磁盘上的 redb 存储与词典目录验证跨实例恢复

use langswitch::translation::{
    FsDictionarySource, LanguageStore, LanguageSwitcher, MemoryLanguageStore, RedbLanguageStore,
    SwitcherConfig,
};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{create_switcher_with, test_config, HtmlTestHelper as H, TestDictionaries};

const PAGE: &str = r#"<p id="p" lang="en">Hello World</p>"#;

#[cfg(test)]
mod passing {
    use super::*;

    #[tokio::test]
    async fn saved_language_is_restored_on_init() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state").join("lang.redb");
        let config = SwitcherConfig {
            persistent: true,
            ..test_config()
        };

        {
            let dom = H::create_test_dom(PAGE);
            let store = RedbLanguageStore::open(&db_path).unwrap();
            let switcher = create_switcher_with(
                &dom,
                &config,
                Box::new(TestDictionaries::source()),
                Some(Box::new(store)),
            );
            switcher.init().await.unwrap();
            assert_eq!(switcher.get_lang(), "en");

            switcher.set_lang("fr").await.unwrap();
        }

        let dom = H::create_test_dom(PAGE);
        let store = RedbLanguageStore::open(&db_path).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("fr"));

        let switcher = create_switcher_with(
            &dom,
            &config,
            Box::new(TestDictionaries::source()),
            Some(Box::new(store)),
        );
        switcher.init().await.unwrap();

        assert_eq!(switcher.get_lang(), "fr");
        assert_eq!(H::inner(&dom, "p"), "Bonjour le monde");
    }

    #[tokio::test]
    async fn switching_back_to_default_is_saved_too() {
        let dom = H::create_test_dom(PAGE);
        let config = SwitcherConfig {
            persistent: true,
            ..test_config()
        };
        let store = std::rc::Rc::new(MemoryLanguageStore::default());
        let switcher = create_switcher_with(
            &dom,
            &config,
            Box::new(TestDictionaries::source()),
            Some(Box::new(SharedStore(store.clone()))),
        );

        switcher.set_lang("es").await.unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("es"));

        switcher.set_lang("en").await.unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn nothing_is_saved_when_persistence_is_off() {
        let dom = H::create_test_dom(PAGE);
        let store = std::rc::Rc::new(MemoryLanguageStore::new(Some("fr")));
        let config = SwitcherConfig {
            lang: "es".to_string(),
            ..test_config()
        };
        let switcher = create_switcher_with(
            &dom,
            &config,
            Box::new(TestDictionaries::source()),
            Some(Box::new(SharedStore(store.clone()))),
        );

        switcher.init().await.unwrap();

        // 未启用持久化时忽略已保存的语言
        assert_eq!(switcher.get_lang(), "es");
        assert_eq!(store.load().unwrap().as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn from_config_reads_dictionary_directory() {
        let dir = tempfile::tempdir().unwrap();
        TestDictionaries::write_to(&dir.path().join("languages"));

        let config = SwitcherConfig {
            lang: "es".to_string(),
            path: dir.path().join("languages").display().to_string(),
            storage_path: dir.path().join("lang.redb").display().to_string(),
            ..SwitcherConfig::default()
        };

        let dom = H::create_test_dom(PAGE);
        {
            let switcher = LanguageSwitcher::from_config(dom.document.clone(), &config).unwrap();
            switcher.init().await.unwrap();
            assert_eq!(H::inner(&dom, "p"), "Hola Mundo");
        }

        let store = RedbLanguageStore::open(dir.path().join("lang.redb")).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn dictionary_keys_are_sanitized_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("es.json"),
            "{\"  Hello\\n   World  \": \"Hola   Mundo\"}",
        )
        .unwrap();

        let dom = H::create_test_dom(PAGE);
        let switcher = create_switcher_with(
            &dom,
            &test_config(),
            Box::new(FsDictionarySource::new(dir.path(), "json")),
            None,
        );
        switcher.set_lang("es").await.unwrap();

        // 值保持原样
        assert_eq!(H::inner(&dom, "p"), "Hola   Mundo");
        assert_eq!(switcher.t("Hello World"), "Hola   Mundo");
    }
}

#[cfg(test)]
mod failing {
    use super::*;

    #[tokio::test]
    async fn malformed_dictionary_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("es.json"), r#"{"Hello World": 1}"#).unwrap();

        let dom = H::create_test_dom(PAGE);
        let switcher = create_switcher_with(
            &dom,
            &test_config(),
            Box::new(FsDictionarySource::new(dir.path(), "json")),
            None,
        );

        let error = switcher.set_lang("es").await.unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("Error loading language: es"));
        assert!(message.contains("parsererror"));
        assert_eq!(H::inner(&dom, "p"), "Hello World");
    }
}

/// 与测试共享同一个内存存储
struct SharedStore(std::rc::Rc<MemoryLanguageStore>);

impl LanguageStore for SharedStore {
    fn load(&self) -> langswitch::TranslationResult<Option<String>> {
        self.0.load()
    }

    fn save(&self, lang: &str) -> langswitch::TranslationResult<()> {
        self.0.save(lang)
    }
}
