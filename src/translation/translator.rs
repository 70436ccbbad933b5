//! 子树翻译
//!
//! 选出带有源语言标记的元素，逐条套用词典；可选地把交叉翻译未覆盖的元素
//! 退回默认语言，留给后续的完整词典翻译处理。

use markup5ever_rcdom::Handle;

use crate::parsers::html::{find_by_attr, get_node_attr, is_element, LANG_ATTR};

use super::dictionary::Dictionary;
use super::matcher::{ElementRewriter, MatchOptions, PreparedEntry};

/// 回退到默认语言所需的信息
#[derive(Debug, Clone, Copy)]
pub struct Fallback<'a> {
    /// 切换前的当前语言
    pub current_lang: &'a str,
    /// 默认语言
    pub default_lang: &'a str,
    /// 切换前生效的完整词典（默认语言 → 当前语言）
    pub dictionary: &'a Dictionary,
}

/// 一次翻译遍历的参数
#[derive(Debug, Clone, Copy)]
pub struct Pass<'a> {
    /// 为 `false` 时只处理根元素本身
    pub descendants: bool,
    pub from_lang: &'a str,
    pub to_lang: &'a str,
    pub dictionary: &'a Dictionary,
    /// 键值互换使用词典
    pub reverse: bool,
    pub fallback: Option<Fallback<'a>>,
}

impl<'a> Pass<'a> {
    pub fn new(from_lang: &'a str, to_lang: &'a str, dictionary: &'a Dictionary) -> Self {
        Self {
            descendants: true,
            from_lang,
            to_lang,
            dictionary,
            reverse: false,
            fallback: None,
        }
    }

    pub fn root_only(mut self) -> Self {
        self.descendants = false;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback<'a>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

fn prepare<'d>(dictionary: &'d Dictionary, reverse: bool, clean: bool) -> Vec<PreparedEntry<'d>> {
    dictionary
        .iter()
        .map(|(key, value)| {
            if reverse {
                PreparedEntry::new(value, key, clean)
            } else {
                PreparedEntry::new(key, value, clean)
            }
        })
        .collect()
}

fn candidates(root: &Handle, descendants: bool, from_lang: &str) -> Vec<Handle> {
    if descendants {
        find_by_attr(root, LANG_ATTR, from_lang)
    } else if is_element(root) && get_node_attr(root, LANG_ATTR).as_deref() == Some(from_lang) {
        vec![root.clone()]
    } else {
        Vec::new()
    }
}

/// 翻译 `root` 下带有 `from_lang` 标记的元素，返回处理的元素数
pub fn translate(root: &Handle, pass: &Pass<'_>, options: &MatchOptions) -> usize {
    // 候选集合在改写前一次性确定
    let elements = candidates(root, pass.descendants, pass.from_lang);
    if elements.is_empty() {
        return 0;
    }

    let entries = prepare(pass.dictionary, pass.reverse, options.clean);
    let fallback_entries = pass
        .fallback
        .map(|fallback| (fallback, prepare(fallback.dictionary, true, options.clean)));

    let mut rewritten = 0;
    for element in &elements {
        let mut rewriter = ElementRewriter::new(element, options);
        let mut touched = false;

        for entry in &entries {
            touched |= rewriter.apply(entry, pass.to_lang).any();
        }

        if let Some((fallback, entries)) = &fallback_entries {
            if rewriter.lang().as_deref() == Some(fallback.current_lang) {
                for entry in entries {
                    touched |= rewriter.apply(entry, fallback.default_lang).any();
                }
            }
        }

        if touched {
            rewritten += 1;
        }
    }

    tracing::debug!(
        "翻译遍历 {} → {}: {} 个候选元素，{} 个被改写",
        pass.from_lang,
        pass.to_lang,
        elements.len(),
        rewritten
    );

    elements.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{html_to_dom, inner_html};
    use markup5ever_rcdom::RcDom;

    fn dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").unwrap()
    }

    fn by_id(dom: &RcDom, id: &str) -> Handle {
        find_by_attr(&dom.document, "id", id).remove(0)
    }

    #[test]
    fn translates_only_tagged_descendants() {
        let dom = dom(
            "<p id=\"a\" lang=\"en\">Hello</p><p id=\"b\">Hello</p><p id=\"c\" lang=\"de\">Hello</p>",
        );
        let dict: Dictionary = [("Hello", "Hola")].into_iter().collect();

        let visited = translate(
            &dom.document,
            &Pass::new("en", "es", &dict),
            &MatchOptions::default(),
        );

        assert_eq!(visited, 1);
        assert_eq!(inner_html(&by_id(&dom, "a")), "Hola");
        assert_eq!(inner_html(&by_id(&dom, "b")), "Hello");
        assert_eq!(inner_html(&by_id(&dom, "c")), "Hello");
    }

    #[test]
    fn root_only_pass_ignores_descendants() {
        let dom = dom("<div id=\"r\" lang=\"en\">Hi<span id=\"s\" lang=\"en\">Yes</span></div>");
        let dict: Dictionary = [("Yes", "S\u{ed}")].into_iter().collect();
        let root = by_id(&dom, "r");
        let options = MatchOptions::default();

        let root_only = Pass::new("en", "es", &dict).root_only();
        assert_eq!(translate(&root, &root_only, &options), 1);
        assert_eq!(inner_html(&by_id(&dom, "s")), "Yes");

        assert_eq!(translate(&root, &Pass::new("en", "es", &dict), &options), 1);
        assert_eq!(inner_html(&by_id(&dom, "s")), "S\u{ed}");
    }

    #[test]
    fn reverse_swaps_keys_and_values() {
        let dom = dom("<p id=\"p\" lang=\"es\">Hola Mundo</p>");
        let dict: Dictionary = [("Hello World", "Hola Mundo")].into_iter().collect();

        translate(
            &dom.document,
            &Pass::new("es", "en", &dict).reversed(),
            &MatchOptions::default(),
        );

        let p = by_id(&dom, "p");
        assert_eq!(inner_html(&p), "Hello World");
        assert_eq!(get_node_attr(&p, "lang"), Some("en".to_string()));
    }

    #[test]
    fn unmatched_elements_fall_back_to_default_language() {
        let dom = dom("<p id=\"hi\" lang=\"es\">Hola</p><p id=\"bye\" lang=\"es\">Adios</p>");
        let es: Dictionary = [("hello", "Hola"), ("bye", "Adios")].into_iter().collect();
        let fr: Dictionary = [("hello", "Bonjour")].into_iter().collect();
        let cross = es.cross(&fr);

        let pass = Pass::new("es", "fr", &cross).with_fallback(Fallback {
            current_lang: "es",
            default_lang: "en",
            dictionary: &es,
        });
        translate(&dom.document, &pass, &MatchOptions::default());

        let hi = by_id(&dom, "hi");
        let bye = by_id(&dom, "bye");
        assert_eq!(inner_html(&hi), "Bonjour");
        assert_eq!(get_node_attr(&hi, "lang"), Some("fr".to_string()));
        assert_eq!(inner_html(&bye), "bye");
        assert_eq!(get_node_attr(&bye, "lang"), Some("en".to_string()));
    }

    #[test]
    fn empty_dictionary_changes_nothing() {
        let dom = dom("<p id=\"p\" lang=\"en\">Hello</p>");

        let empty = Dictionary::new();
        let pass = Pass::new("en", "es", &empty);

        assert_eq!(translate(&dom.document, &pass, &MatchOptions::default()), 1);
        assert_eq!(get_node_attr(&by_id(&dom, "p"), "lang"), Some("en".to_string()));
    }
}
