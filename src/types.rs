//! Tree model for parsed PHPDoc blocks.
//!
//! This module contains the node types the modifier operates on: the
//! docblock root ([`DocBlock`]), its ordered children ([`DocChild`]), tag
//! wrappers ([`TagNode`]), tag payloads ([`TagValue`]) and the type
//! expressions nested inside them ([`TypeExpr`]).
//!
//! Trees are produced by an external parser and consumed by an external
//! renderer.  Everything here is plain owned data so a tree can cross a
//! JSON boundary via `serde`; node identities ([`NodeId`]) are never
//! serialized and are re-allocated when a tree is deserialized.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::docblock::names::{TAG_MARKER, normalize_marker};

// ─── Identity ───────────────────────────────────────────────────────────────

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tag wrapper or a tag value.
///
/// Two nodes are "the same node" when their ids are equal, regardless of
/// their contents.  Cloning a [`TagNode`] keeps its ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate an id that no other node in this process has been given.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to either a tag wrapper or the value it owns.
///
/// This is what the removal protocol receives when a caller wants to
/// remove "this tag" without holding a borrow into the docblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// Identity of a [`TagNode`] wrapper.
    Tag(NodeId),
    /// Identity of the [`TagValue`] owned by a wrapper.
    Value(NodeId),
}

// ─── Docblock ───────────────────────────────────────────────────────────────

/// One parsed documentation comment.
///
/// `children` is kept in serialization order; every mutation preserves the
/// relative order of the children it does not remove.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocBlock {
    pub children: Vec<DocChild>,
}

impl DocBlock {
    pub fn new(children: Vec<DocChild>) -> Self {
        Self { children }
    }

    /// Iterate over the tag children, skipping text.
    pub fn tags(&self) -> impl Iterator<Item = &TagNode> {
        self.children.iter().filter_map(DocChild::as_tag)
    }

    /// Mutable counterpart of [`tags`](Self::tags).
    pub fn tags_mut(&mut self) -> impl Iterator<Item = &mut TagNode> {
        self.children.iter_mut().filter_map(|child| match child {
            DocChild::Tag(tag) => Some(tag),
            DocChild::Text { .. } => None,
        })
    }

    /// Iterate over the tags named `name`.
    ///
    /// The name is normalized first, so `"param"`, `"@param"` and
    /// `"@@param"` all select `@param` tags.
    pub fn tags_by_name<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a TagNode> + use<'a> {
        let name = TagName::new(name);
        self.tags().filter(move |tag| tag.name == name)
    }

    /// Values of the `@return` tags that parsed as a [`ReturnValue`].
    pub fn return_tag_values(&self) -> impl Iterator<Item = &ReturnValue> {
        self.tags_by_name("@return").filter_map(|tag| match &tag.value {
            TagValue::Return(value) => Some(value),
            _ => None,
        })
    }

    /// Identities of the values [`return_tag_values`](Self::return_tag_values)
    /// yields, for callers that go on to mutate the block.
    pub fn return_value_refs(&self) -> Vec<NodeRef> {
        self.tags_by_name("@return")
            .filter(|tag| matches!(tag.value, TagValue::Return(_)))
            .map(TagNode::value_ref)
            .collect()
    }
}

/// A direct child of a [`DocBlock`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocChild {
    Tag(TagNode),
    /// Free text between tags.  Never inspected or edited by the modifier.
    Text { text: String },
}

impl DocChild {
    pub fn text(text: impl Into<String>) -> Self {
        DocChild::Text { text: text.into() }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            DocChild::Tag(tag) => Some(tag),
            DocChild::Text { .. } => None,
        }
    }

    /// Wrapper identity of this child, if it has one.
    pub fn node_ref(&self) -> Option<NodeRef> {
        self.as_tag().map(TagNode::node_ref)
    }
}

impl From<TagNode> for DocChild {
    fn from(tag: TagNode) -> Self {
        DocChild::Tag(tag)
    }
}

// ─── Tags ───────────────────────────────────────────────────────────────────

/// A tag name such as `@param`.
///
/// Always carries exactly one leading `@`, however it was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TagName(Ustr);

impl TagName {
    pub fn new(name: &str) -> Self {
        TagName(Ustr::from(normalize_marker(name, TAG_MARKER).as_str()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for TagName {
    fn from(name: String) -> Self {
        TagName::new(&name)
    }
}

impl From<TagName> for String {
    fn from(name: TagName) -> Self {
        name.as_str().to_string()
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `@name value` unit inside a docblock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagNode {
    #[serde(skip, default = "NodeId::fresh")]
    id: NodeId,
    #[serde(skip, default = "NodeId::fresh")]
    value_id: NodeId,
    pub name: TagName,
    pub value: TagValue,
}

impl TagNode {
    pub fn new(name: &str, value: TagValue) -> Self {
        Self {
            id: NodeId::fresh(),
            value_id: NodeId::fresh(),
            name: TagName::new(name),
            value,
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::Tag(self.id)
    }

    pub fn value_ref(&self) -> NodeRef {
        NodeRef::Value(self.value_id)
    }

    /// Replace the value.  The new value gets a new identity.
    pub fn set_value(&mut self, value: TagValue) {
        self.value = value;
        self.value_id = NodeId::fresh();
    }
}

impl fmt::Display for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.to_string();
        if value.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, value)
        }
    }
}

/// The payload following a tag name.
///
/// A tag's name says which variants are *expected* (`@param` is normally
/// [`TagValue::Param`] or [`TagValue::Invalid`]) but nothing enforces it,
/// so consumers always match on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagValue {
    Param(ParamValue),
    Return(ReturnValue),
    Var(VarValue),
    /// The payload failed to parse against the tag's grammar.
    Invalid(InvalidValue),
    /// Tags without a structured shape (`@method`, `@throws`, ...).
    Generic(GenericValue),
}

impl TagValue {
    /// The type expression of `@param`, `@return` and `@var` values.
    pub fn type_expr(&self) -> Option<&TypeExpr> {
        match self {
            TagValue::Param(value) => Some(&value.type_expr),
            TagValue::Return(value) => Some(&value.type_expr),
            TagValue::Var(value) => Some(&value.type_expr),
            TagValue::Invalid(_) | TagValue::Generic(_) => None,
        }
    }

    pub fn type_expr_mut(&mut self) -> Option<&mut TypeExpr> {
        match self {
            TagValue::Param(value) => Some(&mut value.type_expr),
            TagValue::Return(value) => Some(&mut value.type_expr),
            TagValue::Var(value) => Some(&mut value.type_expr),
            TagValue::Invalid(_) | TagValue::Generic(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    /// Parameter name including the `$` prefix (e.g. `"$user"`).
    pub parameter_name: String,
    #[serde(default)]
    pub is_variadic: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarValue {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub variable_name: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidValue {
    /// The payload exactly as written.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericValue {
    pub raw: String,
}

/// Join non-empty parts with single spaces.
fn join_parts(f: &mut fmt::Formatter<'_>, parts: &[&str]) -> fmt::Result {
    let mut first = true;
    for part in parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !first {
            f.write_str(" ")?;
        }
        f.write_str(part)?;
        first = false;
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Param(value) => {
                let ty = value.type_expr.to_string();
                let name = if value.is_variadic {
                    format!("...{}", value.parameter_name)
                } else {
                    value.parameter_name.clone()
                };
                join_parts(f, &[ty.as_str(), name.as_str(), value.description.as_str()])
            }
            TagValue::Return(value) => {
                let ty = value.type_expr.to_string();
                join_parts(f, &[ty.as_str(), value.description.as_str()])
            }
            TagValue::Var(value) => {
                let ty = value.type_expr.to_string();
                let name = value.variable_name.as_deref().unwrap_or("");
                join_parts(f, &[ty.as_str(), name, value.description.as_str()])
            }
            TagValue::Invalid(value) => f.write_str(&value.raw),
            TagValue::Generic(value) => f.write_str(&value.raw),
        }
    }
}

// ─── Type expressions ───────────────────────────────────────────────────────

/// A parsed type expression inside a tag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A bare or namespaced type name (`User`, `\App\Models\User`).
    Identifier { name: String },
    /// `A|B|C`, rendered `(A | B | C)`.  Member order and count are
    /// significant.
    Union { types: Vec<TypeExpr> },
    /// The `T[]` shorthand.
    Array { element: Box<TypeExpr> },
    /// Any other shape (generics, callables, intersections, `?T`, ...),
    /// kept as the raw text the parser saw.
    Opaque { raw: String },
}

impl TypeExpr {
    pub fn identifier(name: impl Into<String>) -> Self {
        TypeExpr::Identifier { name: name.into() }
    }

    pub fn union(types: Vec<TypeExpr>) -> Self {
        TypeExpr::Union { types }
    }

    pub fn array_of(element: TypeExpr) -> Self {
        TypeExpr::Array {
            element: Box::new(element),
        }
    }

    pub fn opaque(raw: impl Into<String>) -> Self {
        TypeExpr::Opaque { raw: raw.into() }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Identifier { name } => f.write_str(name),
            TypeExpr::Union { types } => {
                f.write_str("(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
            TypeExpr::Array { element } => write!(f, "{element}[]"),
            TypeExpr::Opaque { raw } => f.write_str(raw),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn param(ty: TypeExpr, name: &str) -> TagNode {
        TagNode::new(
            "@param",
            TagValue::Param(ParamValue {
                type_expr: ty,
                parameter_name: name.to_string(),
                is_variadic: false,
                description: String::new(),
            }),
        )
    }

    #[test]
    fn tag_name_always_has_one_marker() {
        assert_eq!(TagName::new("param"), "@param");
        assert_eq!(TagName::new("@@param"), "@param");
        assert_eq!(TagName::new("@param").as_str(), "@param");
    }

    #[test]
    fn clone_keeps_identity_and_set_value_renews_it() {
        let mut tag = param(TypeExpr::identifier("A"), "$a");
        let copy = tag.clone();
        assert_eq!(tag.node_ref(), copy.node_ref());
        assert_eq!(tag.value_ref(), copy.value_ref());

        tag.set_value(TagValue::Generic(GenericValue { raw: "x".into() }));
        assert_eq!(tag.node_ref(), copy.node_ref());
        assert_ne!(tag.value_ref(), copy.value_ref());
    }

    #[test]
    fn renders_type_shapes() {
        let ty = TypeExpr::union(vec![
            TypeExpr::identifier("A"),
            TypeExpr::array_of(TypeExpr::identifier("B")),
            TypeExpr::opaque("array<int, C>"),
        ]);
        assert_eq!(ty.to_string(), "(A | B[] | array<int, C>)");

        let nested = TypeExpr::array_of(TypeExpr::union(vec![
            TypeExpr::identifier("A"),
            TypeExpr::identifier("B"),
        ]));
        assert_eq!(nested.to_string(), "(A | B)[]");
    }

    #[test]
    fn renders_tag_values() {
        let mut tag = param(TypeExpr::identifier("int"), "$ids");
        assert_eq!(tag.to_string(), "@param int $ids");

        if let TagValue::Param(value) = &mut tag.value {
            value.is_variadic = true;
            value.description = "the ids".into();
        }
        assert_eq!(tag.to_string(), "@param int ...$ids the ids");

        let var = TagNode::new(
            "var",
            TagValue::Var(VarValue {
                type_expr: TypeExpr::identifier("User"),
                variable_name: None,
                description: String::new(),
            }),
        );
        assert_eq!(var.to_string(), "@var User");

        let bare = TagNode::new(
            "@deprecated",
            TagValue::Generic(GenericValue { raw: String::new() }),
        );
        assert_eq!(bare.to_string(), "@deprecated");
    }

    #[test]
    fn return_accessors_skip_invalid_values() {
        let good = TagNode::new(
            "@return",
            TagValue::Return(ReturnValue {
                type_expr: TypeExpr::identifier("A"),
                description: String::new(),
            }),
        );
        let bad = TagNode::new(
            "@return",
            TagValue::Invalid(InvalidValue { raw: "<<".into() }),
        );
        let good_ref = good.value_ref();
        let doc = DocBlock::new(vec![
            bad.into(),
            DocChild::text("Summary."),
            good.into(),
        ]);

        assert_eq!(doc.return_tag_values().count(), 1);
        assert_eq!(doc.return_value_refs(), vec![good_ref]);
    }

    #[test]
    fn deserialized_tags_get_fresh_identities() {
        let json = r#"{"children":[
            {"kind":"tag","name":"param","value":{"kind":"param","type":{"kind":"identifier","name":"A"},"parameter_name":"$a"}},
            {"kind":"text","text":"hello"}
        ]}"#;
        let first: DocBlock = serde_json::from_str(json).expect("valid docblock json");
        let second: DocBlock = serde_json::from_str(json).expect("valid docblock json");

        let a = first.tags().next().expect("one tag");
        let b = second.tags().next().expect("one tag");
        assert_eq!(a.name, "@param");
        assert_eq!(a.to_string(), "@param A $a");
        assert_ne!(a.node_ref(), b.node_ref());
        assert_ne!(a.value_ref(), b.value_ref());
        assert_eq!(first.children.len(), 2);
    }
}
