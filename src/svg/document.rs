//! Owned, mutable XML tree for SVG templates.
//!
//! Documents are parsed with `quick-xml` into a tree whose child lists are
//! persistent vectors, so cloning a template per cell is O(1) and only the
//! touched branches get copied on write. Element namespaces are resolved at
//! parse time; lookups match on (namespace, local name) the way an XPath
//! query with a bound default-namespace prefix would.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::TemplateError;

/// XLink namespace, used for embedded image references.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

type Result<T> = std::result::Result<T, TemplateError>;

/// A node in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, unescaped.
    Text(String),
    CData(String),
    /// Raw comment body.
    Comment(String),
    /// Raw processing instruction body (target and data).
    Instruction(String),
    /// Raw doctype body.
    Doctype(String),
}

/// A name/value attribute pair, value unescaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with its attributes in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: SmallVec<[Attribute; 8]>,
    children: im::Vector<Node>,
}

impl Element {
    /// Create an element with a qualified name in the given namespace.
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            attributes: SmallVec::new(),
            children: im::Vector::new(),
        }
    }

    /// Qualified name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// Resolved namespace URI.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace() == Some(namespace) && self.local_name() == local
    }

    /// Attribute value by qualified name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Shorthand for the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Child nodes.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Append a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push_back(node);
    }

    /// Character data before the first child element.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in self.children.iter() {
            match node {
                Node::Text(t) | Node::CData(t) => text.push_str(t),
                Node::Element(_) => break,
                _ => {}
            }
        }
        text
    }

    /// Replace the character data before the first child element. An empty
    /// string clears it. Child elements are kept.
    pub fn set_text(&mut self, text: &str) {
        while matches!(self.children.front(), Some(Node::Text(_) | Node::CData(_))) {
            self.children.pop_front();
        }
        if !text.is_empty() {
            self.children.push_front(Node::Text(text.to_string()));
        }
    }

    /// Visit this element and every descendant element, pre-order.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in self.children.iter_mut() {
            if let Node::Element(el) = child {
                el.walk_mut(f);
            }
        }
    }

    /// This element and every descendant element, pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in self.children.iter() {
            if let Node::Element(el) = child {
                el.collect(out);
            }
        }
    }
}

/// A parsed document: the root element plus any top-level markup around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl Document {
    /// Parse UTF-8 document bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let content = std::str::from_utf8(bytes).map_err(|_| TemplateError::Encoding)?;
        Self::parse_str(content)
    }

    /// Parse a document from a string.
    pub fn parse_str(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut scopes = NamespaceScopes::default();
        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root = None;

        loop {
            let node = match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(scopes.open(&e)?);
                    continue;
                }
                Event::Empty(e) => {
                    let el = scopes.open(&e)?;
                    scopes.close();
                    Node::Element(el)
                }
                Event::End(_) => {
                    scopes.close();
                    match stack.pop() {
                        Some(el) => Node::Element(el),
                        None => return Err(TemplateError::MissingRoot),
                    }
                }
                Event::Text(e) => Node::Text(e.unescape()?.into_owned()),
                Event::CData(e) => Node::CData(utf8(&e)?.to_string()),
                Event::Comment(e) => Node::Comment(utf8(&e)?.to_string()),
                Event::PI(e) => Node::Instruction(utf8(&e)?.to_string()),
                Event::DocType(e) => Node::Doctype(utf8(&e)?.trim_start().to_string()),
                Event::Decl(_) => continue,
                Event::Eof => break,
            };

            match (stack.last_mut(), node) {
                (Some(parent), node) => parent.push(node),
                (None, Node::Element(el)) if root.is_none() => root = Some(el),
                // Whitespace between top-level markup is not kept
                (None, Node::Text(_)) => {}
                (None, node) if root.is_none() => prolog.push(node),
                (None, node) => epilog.push(node),
            }
        }

        let root = root.ok_or(TemplateError::MissingRoot)?;
        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// The default namespace declared on the root element.
    pub fn default_namespace(&self) -> Result<&str> {
        self.root
            .attr("xmlns")
            .filter(|ns| !ns.is_empty())
            .ok_or(TemplateError::MissingDefaultNamespace)
    }

    /// Visit every element named `local` in the default namespace. Returns
    /// how many were visited.
    pub fn for_each_named(&mut self, local: &str, mut f: impl FnMut(&mut Element)) -> Result<usize> {
        let namespace = self.default_namespace()?.to_string();
        let mut visited = 0;
        self.root.walk_mut(&mut |el| {
            if el.is(&namespace, local) {
                visited += 1;
                f(el);
            }
        });
        Ok(visited)
    }

    /// Set the text of every default-namespace `text` element whose id is
    /// `id`. Fails if there is none.
    pub fn set_placeholder_text(&mut self, id: &'static str, text: &str) -> Result<()> {
        let mut found = 0;
        self.for_each_named("text", |el| {
            if el.id() == Some(id) {
                el.set_text(text);
                found += 1;
            }
        })?;
        if found == 0 {
            return Err(TemplateError::MissingPlaceholder(id));
        }
        Ok(())
    }

    /// Find an element anywhere in the tree by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.root.descendants().into_iter().find(|el| el.id() == Some(id))
    }

    /// Prefix bound to `uri` on the root, declaring `preferred` if none is.
    pub fn ensure_prefix(&mut self, uri: &str, preferred: &str) -> String {
        let bound = self.root.attributes().iter().find_map(|a| {
            a.name
                .strip_prefix("xmlns:")
                .filter(|_| a.value == uri)
                .map(str::to_string)
        });
        if let Some(prefix) = bound {
            return prefix;
        }

        let mut prefix = preferred.to_string();
        let mut n = 0;
        while self.root.attr(&format!("xmlns:{prefix}")).is_some() {
            n += 1;
            prefix = format!("{preferred}{n}");
        }
        self.root.set_attr(format!("xmlns:{prefix}"), uri);
        prefix
    }

    /// Append an element to the root in the root's default namespace.
    pub fn append_to_root(&mut self, name: &str, attributes: impl IntoIterator<Item = (String, String)>) {
        let namespace = self.root.attr("xmlns").map(str::to_string);
        let mut el = Element::new(name, namespace);
        for (k, v) in attributes {
            el.set_attr(k, v);
        }
        self.root.push(Node::Element(el));
    }

    /// Serialize with an XML declaration and UTF-8 encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        newline(&mut writer)?;

        for node in &self.prolog {
            write_node(&mut writer, node)?;
            newline(&mut writer)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            newline(&mut writer)?;
            write_node(&mut writer, node)?;
        }
        newline(&mut writer)?;

        Ok(writer.into_inner())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| TemplateError::Encoding)
}

/// Stack of in-scope namespace declarations. The empty key is the default
/// namespace.
#[derive(Default)]
struct NamespaceScopes {
    scopes: Vec<FxHashMap<String, String>>,
}

impl NamespaceScopes {
    /// Read an opening tag into an element and push its declarations.
    fn open(&mut self, start: &BytesStart<'_>) -> Result<Element> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut declared = FxHashMap::default();
        let mut attributes = SmallVec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();

            if key == "xmlns" {
                declared.insert(String::new(), value.clone());
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declared.insert(prefix.to_string(), value.clone());
            }
            attributes.push(Attribute { name: key, value });
        }
        self.scopes.push(declared);

        let prefix = name.split_once(':').map_or("", |(p, _)| p);
        Ok(Element {
            namespace: self.resolve(prefix),
            name,
            attributes,
            children: im::Vector::new(),
        })
    }

    fn close(&mut self) {
        self.scopes.pop();
    }

    fn resolve(&self, prefix: &str) -> Option<String> {
        if prefix == "xml" {
            return Some("http://www.w3.org/XML/1998/namespace".to_string());
        }
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(prefix))
            .filter(|uri| !uri.is_empty())
            .cloned()
    }
}

fn newline(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    let event = match node {
        Node::Element(el) => return write_element(writer, el),
        Node::Text(t) => Event::Text(BytesText::new(t)),
        Node::CData(t) => Event::CData(BytesCData::new(t.as_str())),
        Node::Comment(t) => Event::Comment(BytesText::from_escaped(t.as_str())),
        Node::Instruction(t) => Event::PI(BytesText::from_escaped(t.as_str())),
        Node::Doctype(t) => Event::DocType(BytesText::from_escaped(t.as_str())),
    };
    writer.write_event(event)?;
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for attr in &el.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if el.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in el.children.iter() {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))?;
    Ok(())
}
