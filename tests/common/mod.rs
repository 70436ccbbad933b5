// 集成测试公共模块
//
// 提供文档构造、词典夹具和引擎创建的辅助函数

use std::path::Path;

use markup5ever_rcdom::{Handle, RcDom};

use langswitch::parsers::html::{find_by_attr, get_node_attr, html_to_dom, inner_html};
use langswitch::translation::{
    Dictionary, DictionarySource, LanguageStore, LanguageSwitcher, StaticDictionarySource,
    SwitcherConfig,
};

/// HTML 测试辅助工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 解析 body 片段为完整文档
    pub fn create_test_dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").expect("test document should parse")
    }

    pub fn by_id(dom: &RcDom, id: &str) -> Handle {
        find_by_attr(&dom.document, "id", id)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("no element with id {id:?}"))
    }

    pub fn inner(dom: &RcDom, id: &str) -> String {
        inner_html(&Self::by_id(dom, id))
    }

    pub fn attr(dom: &RcDom, id: &str, name: &str) -> Option<String> {
        get_node_attr(&Self::by_id(dom, id), name)
    }

    pub fn lang(dom: &RcDom, id: &str) -> Option<String> {
        Self::attr(dom, id, "lang")
    }
}

/// 测试词典
pub struct TestDictionaries;

impl TestDictionaries {
    pub fn spanish() -> Dictionary {
        [
            ("Hello World", "Hola Mundo"),
            ("hello", "Hola"),
            ("bye", "Adios"),
            ("Logo", "<b>Logotipo</b>"),
            ("Send", "Enviar"),
        ]
        .into_iter()
        .collect()
    }

    pub fn french() -> Dictionary {
        [("Hello World", "Bonjour le monde"), ("hello", "Bonjour")]
            .into_iter()
            .collect()
    }

    pub fn source() -> StaticDictionarySource {
        StaticDictionarySource::new()
            .with("es", Self::spanish())
            .with("fr", Self::french())
    }

    /// 把词典写成 `<dir>/<lang>.json`
    pub fn write_to(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(
            dir.join("es.json"),
            r#"{"Hello World": "Hola Mundo", "hello": "Hola", "bye": "Adios"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("fr.json"),
            r#"{"Hello World": "Bonjour le monde", "hello": "Bonjour"}"#,
        )
        .unwrap();
    }
}

/// 不做持久化的测试配置
pub fn test_config() -> SwitcherConfig {
    SwitcherConfig {
        persistent: false,
        ..SwitcherConfig::default()
    }
}

pub fn create_switcher(dom: &RcDom, config: &SwitcherConfig) -> LanguageSwitcher {
    create_switcher_with(dom, config, Box::new(TestDictionaries::source()), None)
}

pub fn create_switcher_with(
    dom: &RcDom,
    config: &SwitcherConfig,
    source: Box<dyn DictionarySource>,
    store: Option<Box<dyn LanguageStore>>,
) -> LanguageSwitcher {
    LanguageSwitcher::new(dom.document.clone(), config, source, store)
        .expect("test configuration should be valid")
}
