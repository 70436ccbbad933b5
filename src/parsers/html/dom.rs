use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::{namespace_url, ns, parse_document, parse_fragment, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> std::io::Result<RcDom> {
    let s = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => encoding.decode(data).0.into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
}

/// 判断节点是否为元素
pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 设置节点属性，`None` 表示移除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<&str>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();

    match attr_value {
        Some(value) => {
            if let Some(attr) = attrs.iter_mut().find(|a| &*a.name.local == attr_name) {
                attr.value.clear();
                attr.value.push_slice(value);
            } else {
                attrs.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", value),
                });
            }
        }
        None => attrs.retain(|a| &*a.name.local != attr_name),
    }
}

/// 获取父节点（不破坏父节点引用）
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let weak = child.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    child.parent.set(weak);
    parent
}

/// 判断 `node` 是否为 `ancestor` 本身或其后代
pub fn is_within(ancestor: &Handle, node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if Rc::ptr_eq(&n, ancestor) {
            return true;
        }
        current = get_parent_node(&n);
    }
    false
}

/// 按文档顺序收集 `root` 的所有后代元素（不含 `root`）
pub fn descendant_elements(root: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();

    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        if is_element(&node) {
            found.push(node);
        }
    }

    found
}

/// 收集带有指定属性值的后代元素
pub fn find_by_attr(root: &Handle, attr_name: &str, attr_value: &str) -> Vec<Handle> {
    descendant_elements(root)
        .into_iter()
        .filter(|node| get_node_attr(node, attr_name).as_deref() == Some(attr_value))
        .collect()
}

/// 序列化元素的子节点，相当于 innerHTML
pub fn inner_html(node: &Handle) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    if serialize(&mut buf, &serializable, opts).is_err() {
        return String::new();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// 将 HTML 片段解析为节点列表，以 `context` 元素作为解析上下文
fn parse_children(context: &Handle, markup: &str) -> Vec<Handle> {
    let context_name = match &context.data {
        NodeData::Element { name, .. } => name.clone(),
        _ => QualName::new(None, ns!(html), LocalName::from("body")),
    };

    let fragment = parse_fragment(RcDom::default(), Default::default(), context_name, vec![])
        .one(markup);

    // 片段解析的结果挂在一个合成的 <html> 根元素下
    let root = fragment.document.children.borrow().first().cloned();
    match root {
        Some(root) => root.children.take(),
        None => Vec::new(),
    }
}

fn adopt(parent: &Handle, nodes: &[Handle]) {
    for node in nodes {
        node.parent.set(Some(Rc::downgrade(parent)));
    }
}

/// 替换元素的全部子节点，相当于设置 innerHTML
pub fn set_inner_html(node: &Handle, markup: &str) {
    if !is_element(node) {
        return;
    }

    let children = parse_children(node, markup);
    adopt(node, &children);

    let old = std::mem::replace(&mut *node.children.borrow_mut(), children);
    for child in old {
        child.parent.set(None);
    }
}

/// 将 HTML 片段追加到元素末尾
pub fn append_html(node: &Handle, markup: &str) -> Vec<Handle> {
    if !is_element(node) {
        return Vec::new();
    }

    let children = parse_children(node, markup);
    adopt(node, &children);
    node.children.borrow_mut().extend(children.iter().cloned());
    children
}

/// 转义文本中的 HTML 特殊字符
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 以纯文本替换元素内容，相当于设置 textContent
pub fn set_text(node: &Handle, text: &str) {
    set_inner_html(node, &escape_text(text));
}
