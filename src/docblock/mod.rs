//! PHPDoc tree editing.
//!
//! This module mutates an already-parsed docblock ([`crate::types::DocBlock`])
//! in place: removing tags by name, by name and content, by documented
//! parameter or by identity; renaming tags; and substituting a class name
//! throughout the type expressions of `@param`, `@return` and `@var` tags.
//!
//! Every operation is total.  When nothing matches, nothing changes and
//! nothing is reported.
//!
//! # Submodules
//!
//! - [`names`]: marker normalization (`@param`, `$user`) and
//!   fully-qualified class names.
//! - [`removal`]: tag removal entry points and the identity-based removal
//!   protocol they share.
//! - [`rewrite`]: tag renaming, recursive type substitution, the
//!   external collaborator traits and the [`PhpDocModifier`] facade.

pub mod names;
pub mod removal;
pub mod rewrite;

// ─── Re-exports ─────────────────────────────────────────────────────────────

pub use names::{
    NAMESPACE_SEPARATOR, TAG_MARKER, VARIABLE_MARKER, normalize_marker, to_fully_qualified,
};

pub use removal::{
    remove_by_name, remove_by_name_and_content, remove_node, remove_param_by_parameter,
    remove_return_values,
};

pub use rewrite::{
    DocBlockDecorator, NoTypeRelation, NoopDecorator, PhpDocModifier, TypeRelation, rename_tag,
    rewrite_type, substitute_type,
};
