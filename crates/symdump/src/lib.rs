#![doc = include_str!("../../../README.md")]

mod access_path;
mod config;
mod descriptor;
mod doc_url;
mod docstring;
mod error;
mod magic;
mod modifiers;
mod param;
mod reflection;

pub use crate::{
    access_path::{AccessRule, OwnerContext, RULES, rule_for, synthesize},
    config::{DEFAULT_DOC_BASE_URL, DocConfig},
    descriptor::{Access, CallableDescriptor, OperatorKind},
    doc_url::DocUrlResolver,
    docstring::{strip_comment, summary},
    error::{InvalidSymbolError, ReflectionError, ReflectionResult},
    magic::MagicMethod,
    modifiers::Modifiers,
    param::{ParamSpec, render_params},
    reflection::{
        CallableInfo, ClassInfo, DefaultValue, MethodInfo, MethodRef, ParamInfo, Reflector, Registry, SourceLocation,
        Snapshot, Symbol, Visibility,
    },
};
