//! Tag removal.
//!
//! All entry points funnel into [`remove_node`], which removes children by
//! identity ([`NodeRef`]) rather than by content, so two textually equal
//! tags are never confused with each other.

use memchr::memmem;
use tracing::debug;

use crate::types::{DocBlock, DocChild, NodeRef, TagValue};

use super::names::{VARIABLE_MARKER, normalize_marker};

/// Remove every tag named `tag_name` (`"deprecated"` and `"@deprecated"`
/// are equivalent).
pub fn remove_by_name(doc: &mut DocBlock, tag_name: &str) {
    let targets: Vec<NodeRef> = doc
        .tags_by_name(tag_name)
        .map(|tag| tag.node_ref())
        .collect();
    debug!(tag = tag_name, matches = targets.len(), "removing tags by name");

    for target in targets {
        remove_node(doc, target);
    }
}

/// Remove the tags named `tag_name` whose rendered value contains
/// `content` as a literal, case-sensitive substring.
///
/// The match runs against the whole value text, so `@method foo(): void`
/// is removed by `content = "foo"`.  An empty `content` matches every tag
/// with that name.
pub fn remove_by_name_and_content(doc: &mut DocBlock, tag_name: &str, content: &str) {
    let finder = memmem::Finder::new(content.as_bytes());
    let targets: Vec<NodeRef> = doc
        .tags_by_name(tag_name)
        .filter(|tag| finder.find(tag.value.to_string().as_bytes()).is_some())
        .map(|tag| tag.node_ref())
        .collect();
    debug!(
        tag = tag_name,
        content,
        matches = targets.len(),
        "removing tags by name and content"
    );

    for target in targets {
        remove_node(doc, target);
    }
}

/// Remove the `@param` tag(s) documenting `parameter_name` (`"x"` and
/// `"$x"` are equivalent).
///
/// Unparseable `@param` payloads are matched when their raw text is
/// exactly the parameter name, which is what a bare `@param $x` becomes
/// when the type is missing.
pub fn remove_param_by_parameter(doc: &mut DocBlock, parameter_name: &str) {
    let parameter_name = normalize_marker(parameter_name, VARIABLE_MARKER);
    let targets: Vec<NodeRef> = doc
        .tags_by_name("@param")
        .filter(|tag| match &tag.value {
            TagValue::Invalid(value) => value.raw == parameter_name,
            TagValue::Param(value) => value.parameter_name == parameter_name,
            _ => false,
        })
        .map(|tag| tag.node_ref())
        .collect();
    debug!(
        parameter = parameter_name.as_str(),
        matches = targets.len(),
        "removing @param tags"
    );

    for target in targets {
        remove_node(doc, target);
    }
}

/// Remove every `@return` tag whose value parsed as a return value.
///
/// Matching is done on the value identity, not the wrapper.
pub fn remove_return_values(doc: &mut DocBlock) {
    let targets = doc.return_value_refs();
    debug!(matches = targets.len(), "removing @return values");

    for target in targets {
        remove_node(doc, target);
    }
}

/// Remove the child identified by `target`.
///
/// First looks for a child whose wrapper identity is `target` and removes
/// only the first such child.  If none is found, removes *every* tag
/// whose value identity is `target`; a value shared by cloned wrappers
/// therefore takes all of them with it.
///
/// Surviving children keep their relative order.
pub fn remove_node(doc: &mut DocBlock, target: NodeRef) {
    if let Some(index) = doc
        .children
        .iter()
        .position(|child| child.node_ref() == Some(target))
    {
        doc.children.remove(index);
        return;
    }

    doc.children.retain(|child| match child {
        DocChild::Tag(tag) => tag.value_ref() != target,
        DocChild::Text { .. } => true,
    });
}
