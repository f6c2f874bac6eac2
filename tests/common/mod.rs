#![allow(dead_code)]

use phpdoc_modifier::{
    DocBlock, DocChild, GenericValue, InvalidValue, ParamValue, ReturnValue, TagNode, TagValue,
    TypeExpr, VarValue,
};

/// Install a `tracing` subscriber honouring `RUST_LOG`.  Safe to call from
/// every test; only the first call in a process takes effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ident(name: &str) -> TypeExpr {
    TypeExpr::identifier(name)
}

pub fn param(ty: TypeExpr, name: &str) -> TagNode {
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

pub fn ret(ty: TypeExpr) -> TagNode {
    TagNode::new(
        "@return",
        TagValue::Return(ReturnValue {
            type_expr: ty,
            description: String::new(),
        }),
    )
}

pub fn var(ty: TypeExpr, name: Option<&str>) -> TagNode {
    TagNode::new(
        "@var",
        TagValue::Var(VarValue {
            type_expr: ty,
            variable_name: name.map(str::to_string),
            description: String::new(),
        }),
    )
}

pub fn generic(name: &str, raw: &str) -> TagNode {
    TagNode::new(name, TagValue::Generic(GenericValue { raw: raw.to_string() }))
}

pub fn invalid(name: &str, raw: &str) -> TagNode {
    TagNode::new(name, TagValue::Invalid(InvalidValue { raw: raw.to_string() }))
}

pub fn doc(tags: Vec<TagNode>) -> DocBlock {
    DocBlock::new(tags.into_iter().map(DocChild::from).collect())
}

/// Every tag of `doc` rendered as `@name value`, in order.
pub fn rendered(doc: &DocBlock) -> Vec<String> {
    doc.tags().map(|tag| tag.to_string()).collect()
}
