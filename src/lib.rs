//! In-place editing of parsed PHPDoc trees.
//!
//! A caller parses a `/** ... */` comment into a [`DocBlock`] with its own
//! parser, edits it through this crate, and renders it back with its own
//! renderer.  Parsing and rendering both stay outside this crate.
//!
//! - [`types`]: the tree model (docblock, tags, tag values, type
//!   expressions) and node identities.
//! - [`docblock`]: the edit operations and the [`PhpDocModifier`] facade.
//!
//! ```
//! use phpdoc_modifier::{
//!     DocBlock, ParamValue, PhpDocModifier, TagNode, TagValue, TypeExpr,
//! };
//!
//! let param = |ty: &str, name: &str| {
//!     TagNode::new(
//!         "@param",
//!         TagValue::Param(ParamValue {
//!             type_expr: TypeExpr::identifier(ty),
//!             parameter_name: name.to_string(),
//!             is_variadic: false,
//!             description: String::new(),
//!         }),
//!     )
//! };
//! let mut doc = DocBlock::new(vec![param("A", "$a").into(), param("B", "$b").into()]);
//!
//! let modifier: PhpDocModifier = PhpDocModifier::default();
//! modifier.remove_param_by_parameter(&mut doc, "a");
//! modifier.substitute_type(&mut doc, "B", "App\\Z");
//!
//! let tags: Vec<String> = doc.tags().map(|tag| tag.to_string()).collect();
//! assert_eq!(tags, vec!["@param \\App\\Z $b"]);
//! ```

pub mod docblock;
pub mod types;

pub use docblock::{
    DocBlockDecorator, NoTypeRelation, NoopDecorator, PhpDocModifier, TypeRelation,
};
pub use types::{
    DocBlock, DocChild, GenericValue, InvalidValue, NodeId, NodeRef, ParamValue, ReturnValue,
    TagName, TagNode, TagValue, TypeExpr, VarValue,
};
