//! Markup tree artifacts
//!
//! An immutable, XML-shaped tree: [`MarkupDocument`] → [`Tag`] →
//! ([`Attribute`] | [`Content`]). Attribute and child lists are
//! [`im::Vector`]s, so a copy made through a `with_*` method shares every
//! element it did not touch.
//!
//! Parsing and printing markup are outside this crate; trees are built in
//! memory by the host (or by tests) and handed to recipes.

use im::Vector;

use crate::hash::{ContentHash, Fingerprinter};
use crate::id::TreeId;
use crate::path::SourcePath;

/// Quote style around an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quote {
    /// `key="value"`
    #[default]
    Double,

    /// `key='value'`
    Single,

    /// `key=value` (HTML-style)
    None,
}

impl Quote {
    /// Delimiter text
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Double => "\"",
            Self::Single => "'",
            Self::None => "",
        }
    }
}

/// Value half of an attribute, with its quote style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    id: TreeId,
    prefix: String,
    quote: Quote,
    value: String,
}

impl AttributeValue {
    /// New value node
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>, quote: Quote) -> Self {
        Self {
            id: TreeId::random(),
            prefix: String::new(),
            quote,
            value: value.into(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Whitespace between `=` and the opening quote
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Quote style
    #[inline]
    #[must_use]
    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// Unquoted payload
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Same node, new payload
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Same node, new leading whitespace
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// `key="value"` pair on a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    id: TreeId,
    prefix: String,
    key: String,
    before_equals: String,
    value: AttributeValue,
}

impl Attribute {
    /// Double-quoted attribute preceded by a single space
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::quoted(key, value, Quote::Double)
    }

    /// Attribute with an explicit quote style
    #[must_use]
    pub fn quoted(key: impl Into<String>, value: impl Into<String>, quote: Quote) -> Self {
        Self {
            id: TreeId::random(),
            prefix: " ".to_string(),
            key: key.into(),
            before_equals: String::new(),
            value: AttributeValue::new(value, quote),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Whitespace before the key
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whitespace between key and `=`
    #[inline]
    #[must_use]
    pub fn before_equals(&self) -> &str {
        &self.before_equals
    }

    /// Attribute name
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value node
    #[inline]
    #[must_use]
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Unquoted value payload
    #[inline]
    #[must_use]
    pub fn value_as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Same attribute, new value node
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: AttributeValue) -> Self {
        self.value = value;
        self
    }

    /// Same attribute, new leading whitespace
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Same attribute, new whitespace before `=`
    #[inline]
    #[must_use]
    pub fn with_before_equals(mut self, before_equals: impl Into<String>) -> Self {
        self.before_equals = before_equals.into();
        self
    }

    fn fingerprint_into(&self, fp: &mut Fingerprinter) {
        fp.marker(b'a')
            .field(&self.prefix)
            .field(&self.key)
            .field(&self.before_equals)
            .field(&self.value.prefix)
            .field(self.value.quote.as_str())
            .field(&self.value.value);
    }
}

/// Character data between tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharData {
    id: TreeId,
    cdata: bool,
    text: String,
}

impl CharData {
    /// Plain character data
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            cdata: false,
            text: text.into(),
        }
    }

    /// `<![CDATA[...]]>` section
    #[must_use]
    pub fn cdata(text: impl Into<String>) -> Self {
        Self {
            cdata: true,
            ..Self::new(text)
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Whether this is a CDATA section
    #[inline]
    #[must_use]
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    /// Text payload
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `<!-- ... -->`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: TreeId,
    prefix: String,
    text: String,
}

impl Comment {
    /// New comment
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix: String::new(),
            text: text.into(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Comment body
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Child of a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Nested element
    Tag(Tag),

    /// Text
    CharData(CharData),

    /// Comment
    Comment(Comment),
}

impl Content {
    /// Node id
    #[must_use]
    pub fn id(&self) -> TreeId {
        match self {
            Self::Tag(tag) => tag.id(),
            Self::CharData(data) => data.id(),
            Self::Comment(comment) => comment.id(),
        }
    }

    /// The nested tag, if this is one
    #[inline]
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    fn fingerprint_into(&self, fp: &mut Fingerprinter) {
        match self {
            Self::Tag(tag) => tag.fingerprint_into(fp),
            Self::CharData(data) => {
                fp.marker(if data.cdata { b'C' } else { b'c' }).field(&data.text);
            }
            Self::Comment(comment) => {
                fp.marker(b'!').field(&comment.prefix).field(&comment.text);
            }
        }
    }
}

impl From<Tag> for Content {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<CharData> for Content {
    fn from(data: CharData) -> Self {
        Self::CharData(data)
    }
}

impl From<Comment> for Content {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

/// Element node
///
/// `content` is `None` for a self-closing tag (`<a/>`) and `Some` (possibly
/// empty) for a tag with a closing counterpart (`<a></a>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TreeId,
    prefix: String,
    name: String,
    attributes: Vector<Attribute>,
    content: Option<Vector<Content>>,
    before_tag_delimiter: String,
}

impl Tag {
    /// Self-closing tag without attributes
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix: String::new(),
            name: name.into(),
            attributes: Vector::new(),
            content: None,
            before_tag_delimiter: String::new(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Whitespace before `<`
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Tag name, including any namespace prefix
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in source order
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &Vector<Attribute> {
        &self.attributes
    }

    /// First attribute with the given key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key() == key)
    }

    /// Children, `None` for a self-closing tag
    #[inline]
    #[must_use]
    pub fn content(&self) -> Option<&Vector<Content>> {
        self.content.as_ref()
    }

    /// Whether the tag is written `<a/>`
    #[inline]
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.content.is_none()
    }

    /// Direct child tags
    pub fn child_tags(&self) -> impl Iterator<Item = &Tag> {
        self.content.iter().flatten().filter_map(Content::as_tag)
    }

    /// First direct child tag with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Tag> {
        self.child_tags().find(|t| t.name() == name)
    }

    /// Same tag, new whitespace before `<`
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Same tag, new attribute list
    #[inline]
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vector<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Same tag, one more attribute at the end
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push_back(attribute);
        self
    }

    /// Same tag, new children
    #[inline]
    #[must_use]
    pub fn with_content(mut self, content: Option<Vector<Content>>) -> Self {
        self.content = content;
        self
    }

    /// Same tag, one more child at the end
    ///
    /// A self-closing tag becomes an open/close pair.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Content>) -> Self {
        self.content
            .get_or_insert_with(Vector::new)
            .push_back(child.into());
        self
    }

    /// Same tag, whitespace before `>` or `/>`
    #[inline]
    #[must_use]
    pub fn with_before_tag_delimiter(mut self, ws: impl Into<String>) -> Self {
        self.before_tag_delimiter = ws.into();
        self
    }

    fn fingerprint_into(&self, fp: &mut Fingerprinter) {
        fp.marker(b'<').field(&self.prefix).field(&self.name);
        for attribute in &self.attributes {
            attribute.fingerprint_into(fp);
        }
        fp.field(&self.before_tag_delimiter);
        match &self.content {
            None => {
                fp.marker(b'/');
            }
            Some(children) => {
                fp.marker(b'>');
                for child in children {
                    child.fingerprint_into(fp);
                }
            }
        }
        fp.marker(b'.');
    }
}

/// A markup file: optional prolog, one root element, trailing whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    id: TreeId,
    source_path: SourcePath,
    prolog: Option<String>,
    root: Tag,
    eof: String,
}

impl MarkupDocument {
    /// New document around a root element
    #[must_use]
    pub fn new(source_path: SourcePath, root: Tag) -> Self {
        Self {
            id: TreeId::random(),
            source_path,
            prolog: None,
            root,
            eof: String::new(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Path of the file
    #[inline]
    #[must_use]
    pub fn source_path(&self) -> &SourcePath {
        &self.source_path
    }

    /// Raw prolog (`<?xml ...?>`, doctype), kept opaque
    #[inline]
    #[must_use]
    pub fn prolog(&self) -> Option<&str> {
        self.prolog.as_deref()
    }

    /// Root element
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Tag {
        &self.root
    }

    /// Same document, new root
    #[inline]
    #[must_use]
    pub fn with_root(mut self, root: Tag) -> Self {
        self.root = root;
        self
    }

    /// Same document, new prolog
    #[inline]
    #[must_use]
    pub fn with_prolog(mut self, prolog: impl Into<String>) -> Self {
        self.prolog = Some(prolog.into());
        self
    }

    /// Same document, moved
    #[inline]
    #[must_use]
    pub fn with_source_path(mut self, source_path: SourcePath) -> Self {
        self.source_path = source_path;
        self
    }

    /// Digest of everything a printer would emit
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let mut fp = Fingerprinter::new("markup");
        fp.field(self.prolog.as_deref().unwrap_or_default());
        self.root.fingerprint_into(&mut fp);
        fp.field(&self.eof);
        fp.finish()
    }
}
