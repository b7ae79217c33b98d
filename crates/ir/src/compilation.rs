//! Type registry and compilation units.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::corlib;
use crate::operation::Operation;
use crate::types::{
    self, MemberDefinition, TypeDefinition, TypeKind, TypeSymbol, ARRAY, ENUM, OBJECT, VALUE_TYPE,
};

/// Guards against cyclic type hierarchies in malformed documents.
const MAX_HIERARCHY_DEPTH: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Operations of one source file.
pub struct CompilationUnit {
    pub path: String,
    /// Full file content when available.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: None,
            operations: Vec::new(),
        }
    }

    /// Adds a root operation, stamping every node with this unit's path.
    pub fn push(&mut self, op: Operation) {
        self.operations.push(op.in_file(self.path.clone()));
    }
}

/// Element type of an enumerable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enumerable {
    NotEnumerable,
    /// Only the non-generic `IEnumerable` is known.
    Untyped,
    Typed(TypeSymbol),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    types: BTreeMap<String, TypeDefinition>,
    pub units: Vec<CompilationUnit>,
}

impl Default for Compilation {
    fn default() -> Self {
        Self::new()
    }
}

impl Compilation {
    /// Compilation with the core library pre-registered.
    pub fn new() -> Self {
        let mut compilation = Self::empty();
        for def in corlib::definitions() {
            compilation.define(def);
        }
        compilation
    }

    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
            units: Vec::new(),
        }
    }

    pub fn from_parts(types: Vec<TypeDefinition>, units: Vec<CompilationUnit>) -> Self {
        let mut compilation = Self::new();
        for def in types {
            compilation.define(def);
        }
        compilation.units = units;
        compilation
    }

    /// Registers or replaces a type definition.
    pub fn define(&mut self, def: TypeDefinition) {
        self.types.insert(def.name.clone(), def);
    }

    pub fn definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    fn kind_of(&self, ty: &TypeSymbol) -> TypeKind {
        match ty.kind {
            TypeKind::Class | TypeKind::Struct | TypeKind::Interface => self
                .definition(&ty.name)
                .map(|d| d.kind)
                .unwrap_or(ty.kind),
            other => other,
        }
    }

    pub fn is_value_type(&self, ty: &TypeSymbol) -> bool {
        matches!(self.kind_of(ty), TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_reference_type(&self, ty: &TypeSymbol) -> bool {
        matches!(
            self.kind_of(ty),
            TypeKind::Class
                | TypeKind::Interface
                | TypeKind::Array
                | TypeKind::Delegate
                | TypeKind::Dynamic
        )
    }

    pub fn is_interface(&self, ty: &TypeSymbol) -> bool {
        self.kind_of(ty) == TypeKind::Interface
    }

    pub fn is_sealed(&self, ty: &TypeSymbol) -> bool {
        if ty.is_array() || self.is_value_type(ty) {
            return true;
        }
        self.definition(&ty.name).is_some_and(|d| d.sealed)
    }

    fn base_of(&self, ty: &TypeSymbol) -> Option<TypeSymbol> {
        if ty.is_object() {
            return None;
        }
        match self.kind_of(ty) {
            TypeKind::Array => return Some(TypeSymbol::named(ARRAY, TypeKind::Class)),
            TypeKind::Interface
            | TypeKind::TypeParameter
            | TypeKind::Dynamic
            | TypeKind::Error => return None,
            _ => {}
        }
        if let Some(def) = self.definition(&ty.name) {
            if let Some(base) = &def.base_type {
                return Some(base.substitute(&def.type_parameters, &ty.type_arguments));
            }
        }
        let fallback = match self.kind_of(ty) {
            TypeKind::Struct if ty.name != VALUE_TYPE => VALUE_TYPE,
            TypeKind::Enum => ENUM,
            _ => OBJECT,
        };
        Some(TypeSymbol::named(fallback, TypeKind::Class))
    }

    /// Base classes from the direct base up to `object`.
    pub fn base_types(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut out = Vec::new();
        let mut current = self.base_of(ty);
        while let Some(base) = current {
            if out.len() >= MAX_HIERARCHY_DEPTH || out.contains(&base) {
                break;
            }
            current = self.base_of(&base);
            out.push(base);
        }
        out
    }

    /// Every interface implemented by `ty`, with type arguments substituted.
    pub fn all_interfaces(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut out: Vec<TypeSymbol> = Vec::new();
        let mut seen = HashSet::new();
        let mut pending: Vec<TypeSymbol> = Vec::new();

        if let Some(element) = &ty.element_type {
            let element = element.as_ref().clone();
            pending.push(TypeSymbol::generic(
                types::GENERIC_LIST,
                TypeKind::Interface,
                vec![element.clone()],
            ));
            pending.push(TypeSymbol::generic(
                types::READ_ONLY_LIST,
                TypeKind::Interface,
                vec![element],
            ));
        }
        let mut owners = vec![ty.clone()];
        owners.extend(self.base_types(ty));
        for owner in &owners {
            pending.extend(self.declared_interfaces(owner));
        }

        while let Some(iface) = pending.pop() {
            if out.len() >= MAX_HIERARCHY_DEPTH * 4 || !seen.insert(iface.clone()) {
                continue;
            }
            pending.extend(self.declared_interfaces(&iface));
            out.push(iface);
        }
        out
    }

    fn declared_interfaces(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        match self.definition(&ty.name) {
            Some(def) => def
                .interfaces
                .iter()
                .map(|i| i.substitute(&def.type_parameters, &ty.type_arguments))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Strict derivation: `ty` has `base` among its base classes.
    pub fn derives_from(&self, ty: &TypeSymbol, base: &str) -> bool {
        self.base_types(ty).iter().any(|b| b.name == base)
    }

    pub fn is_or_derives_from(&self, ty: &TypeSymbol, base: &str) -> bool {
        ty.name == base || self.derives_from(ty, base)
    }

    pub fn implements(&self, ty: &TypeSymbol, interface: &str) -> bool {
        ty.name == interface || self.all_interfaces(ty).iter().any(|i| i.name == interface)
    }

    /// Instantiations of the generic `interface` implemented by `ty`.
    pub fn implementations_of(&self, ty: &TypeSymbol, interface: &str) -> Vec<TypeSymbol> {
        let mut out = Vec::new();
        if ty.name == interface {
            out.push(ty.clone());
        }
        out.extend(
            self.all_interfaces(ty)
                .into_iter()
                .filter(|i| i.name == interface),
        );
        out
    }

    /// Looks a member up on `ty`, its base classes and its interfaces.
    pub fn find_member(&self, ty: &TypeSymbol, name: &str) -> Option<&MemberDefinition> {
        let mut owners = vec![ty.clone()];
        owners.extend(self.base_types(ty));
        owners.extend(self.all_interfaces(ty));
        owners.iter().find_map(|owner| {
            self.definition(&owner.name)
                .and_then(|d| d.members.iter().find(|m| m.name == name))
        })
    }

    /// Whether anything about `ty`'s members is known.
    pub fn is_known(&self, ty: &TypeSymbol) -> bool {
        ty.is_array() || self.definition(&ty.name).is_some()
    }

    pub fn enumerable_element_type(&self, ty: &TypeSymbol) -> Enumerable {
        if ty.is_unresolved() {
            return Enumerable::NotEnumerable;
        }
        if ty.is_string() {
            return Enumerable::Typed(TypeSymbol::char());
        }
        if let Some(element) = &ty.element_type {
            return Enumerable::Typed(element.as_ref().clone());
        }
        let generic = self.implementations_of(ty, types::GENERIC_ENUMERABLE);
        match generic.as_slice() {
            [single] => {
                if let Some(arg) = single.type_arguments.first() {
                    return Enumerable::Typed(arg.clone());
                }
                Enumerable::Untyped
            }
            [] if self.implements(ty, types::ENUMERABLE) => Enumerable::Untyped,
            [] => Enumerable::NotEnumerable,
            // Several IEnumerable<T> implementations: element type is ambiguous.
            _ => Enumerable::Untyped,
        }
    }
}
