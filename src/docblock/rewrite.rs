//! Tag renaming and type substitution.
//!
//! Type substitution walks the type expression of every `@param`,
//! `@return` and `@var` value and swaps matching class names for a new
//! one.  Only identifiers, unions and `T[]` arrays are looked into; every
//! other shape is left exactly as parsed.
//!
//! Two collaborators live outside this crate and are injected through
//! [`PhpDocModifier`]:
//!
//! - a [`TypeRelation`] oracle answering "is `A` a subtype or alias of
//!   `B`?", used when an identifier does not match by name;
//! - a [`DocBlockDecorator`] that refreshes whatever derived data the
//!   caller keeps on the tree once a tag's type has been rewritten.

use tracing::{debug, trace};

use crate::types::{DocBlock, DocChild, NodeRef, TagName, TagNode, TypeExpr};

use super::names::{strip_leading_separator, to_fully_qualified};
use super::removal;

// ─── Collaborators ──────────────────────────────────────────────────────────

/// Answers subtype/alias questions between class names.
pub trait TypeRelation {
    /// Whether `type_name` (as written, possibly with a leading `\`) is
    /// `candidate` or one of its subtypes or aliases.
    fn is_a(&self, type_name: &str, candidate: &str) -> bool;
}

impl<F> TypeRelation for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_a(&self, type_name: &str, candidate: &str) -> bool {
        self(type_name, candidate)
    }
}

/// A [`TypeRelation`] that knows no relationships at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeRelation;

impl TypeRelation for NoTypeRelation {
    fn is_a(&self, _type_name: &str, _candidate: &str) -> bool {
        false
    }
}

/// Post-processing hook run after a tag's type has been rewritten.
pub trait DocBlockDecorator {
    fn decorate(&self, doc: &mut DocBlock);
}

impl<F> DocBlockDecorator for F
where
    F: Fn(&mut DocBlock),
{
    fn decorate(&self, doc: &mut DocBlock) {
        self(doc)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecorator;

impl DocBlockDecorator for NoopDecorator {
    fn decorate(&self, _doc: &mut DocBlock) {}
}

// ─── Renaming ───────────────────────────────────────────────────────────────

/// Rename every tag named `old_name` to `new_name`, leaving values as they
/// are.  Both names are normalized to carry one `@`.
pub fn rename_tag(doc: &mut DocBlock, old_name: &str, new_name: &str) {
    let old_name = TagName::new(old_name);
    let new_name = TagName::new(new_name);

    let mut renamed = 0usize;
    for tag in doc.tags_mut().filter(|tag| tag.name == old_name) {
        tag.name = new_name;
        renamed += 1;
    }
    debug!(from = %old_name, to = %new_name, renamed, "renamed tags");
}

// ─── Type substitution ──────────────────────────────────────────────────────

/// Replace `old_type` with `new_type` inside `ty`.
///
/// An identifier matches when its name, ignoring leading `\`, equals
/// `old_type`, or when `relation` says it is a subtype or alias of it.
/// The literal comparison runs first; `relation` is only asked when it
/// fails, the reverse of the order the checks were historically made in.
/// A match is replaced by a fresh identifier holding
/// [`to_fully_qualified`]`(new_type)`.  Union members and array elements
/// are rewritten in place, keeping their order and count.
pub fn rewrite_type<R>(ty: &mut TypeExpr, old_type: &str, new_type: &str, relation: &R)
where
    R: TypeRelation + ?Sized,
{
    match ty {
        TypeExpr::Identifier { name } => {
            let matched =
                strip_leading_separator(name) == old_type || relation.is_a(name, old_type);
            if matched {
                debug!(from = name.as_str(), to = new_type, "rewriting type");
                *ty = TypeExpr::identifier(to_fully_qualified(new_type));
            }
        }
        TypeExpr::Union { types } => {
            for member in types.iter_mut() {
                rewrite_type(member, old_type, new_type, relation);
            }
        }
        TypeExpr::Array { element } => {
            rewrite_type(element, old_type, new_type, relation);
        }
        TypeExpr::Opaque { .. } => {}
    }
}

/// Rewrite the types of every `@param`, `@return` and `@var` value in
/// `doc`, running `decorator` after each tag visited.
///
/// Tags whose value has no type (invalid or generic payloads) are skipped
/// and do not trigger the decorator.  The tags to visit are fixed before
/// the first rewrite: children the decorator inserts are not visited, and
/// tags it removes are skipped.
pub fn substitute_type<D, R>(
    doc: &mut DocBlock,
    old_type: &str,
    new_type: &str,
    decorator: &D,
    relation: &R,
) where
    D: DocBlockDecorator + ?Sized,
    R: TypeRelation + ?Sized,
{
    // Looked up by identity on every step since the decorator may reshape
    // the block between tags.
    let targets: Vec<NodeRef> = doc
        .tags()
        .filter(|tag| tag.value.type_expr().is_some())
        .map(TagNode::node_ref)
        .collect();

    for (position, target) in targets.iter().enumerate() {
        // Cloned wrappers share an id; the nth occurrence is the nth clone.
        let occurrence = targets[..position].iter().filter(|t| *t == target).count();
        let Some(index) = doc
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.node_ref() == Some(*target))
            .map(|(index, _)| index)
            .nth(occurrence)
        else {
            trace!(?target, "tag removed by decorator, skipping");
            continue;
        };

        let Some(ty) = (match &mut doc.children[index] {
            DocChild::Tag(tag) => tag.value.type_expr_mut(),
            DocChild::Text { .. } => None,
        }) else {
            continue;
        };
        rewrite_type(ty, old_type, new_type, relation);

        trace!(index, "decorating docblock");
        decorator.decorate(doc);
    }
}

// ─── Facade ─────────────────────────────────────────────────────────────────

/// Every docblock edit in one place, with the external collaborators
/// injected once.
///
/// ```
/// use phpdoc_modifier::{DocBlock, NoopDecorator, PhpDocModifier};
///
/// let modifier = PhpDocModifier::new(NoopDecorator)
///     .with_type_relation(|name: &str, candidate: &str| name == "Child" && candidate == "Base");
/// let mut doc = DocBlock::default();
/// modifier.substitute_type(&mut doc, "Base", "App\\Other");
/// ```
#[derive(Debug, Clone)]
pub struct PhpDocModifier<D = NoopDecorator, R = NoTypeRelation> {
    decorator: D,
    relation: R,
}

impl<D: DocBlockDecorator> PhpDocModifier<D, NoTypeRelation> {
    pub fn new(decorator: D) -> Self {
        Self {
            decorator,
            relation: NoTypeRelation,
        }
    }
}

impl Default for PhpDocModifier {
    fn default() -> Self {
        Self::new(NoopDecorator)
    }
}

impl<D: DocBlockDecorator, R: TypeRelation> PhpDocModifier<D, R> {
    /// Use `relation` for subtype/alias matching during substitution.
    pub fn with_type_relation<R2: TypeRelation>(self, relation: R2) -> PhpDocModifier<D, R2> {
        PhpDocModifier {
            decorator: self.decorator,
            relation,
        }
    }

    pub fn remove_by_name(&self, doc: &mut DocBlock, tag_name: &str) {
        removal::remove_by_name(doc, tag_name);
    }

    pub fn remove_by_name_and_content(&self, doc: &mut DocBlock, tag_name: &str, content: &str) {
        removal::remove_by_name_and_content(doc, tag_name, content);
    }

    pub fn remove_param_by_parameter(&self, doc: &mut DocBlock, parameter_name: &str) {
        removal::remove_param_by_parameter(doc, parameter_name);
    }

    pub fn remove_return_values(&self, doc: &mut DocBlock) {
        removal::remove_return_values(doc);
    }

    pub fn remove_node(&self, doc: &mut DocBlock, target: NodeRef) {
        removal::remove_node(doc, target);
    }

    pub fn rename_tag(&self, doc: &mut DocBlock, old_name: &str, new_name: &str) {
        rename_tag(doc, old_name, new_name);
    }

    pub fn substitute_type(&self, doc: &mut DocBlock, old_type: &str, new_type: &str) {
        substitute_type(doc, old_type, new_type, &self.decorator, &self.relation);
    }
}
