//! Type symbols and type definitions.
//!
//! A [`TypeSymbol`] is a *reference* to a type as it appears on an operation
//! (`List<string>`, `int[]`, `T`). A [`TypeDefinition`] is the declaration
//! registered in a [`Compilation`](crate::Compilation): base type, interfaces,
//! members and user-defined conversions, written in terms of its own type
//! parameters.

use serde::{Deserialize, Serialize};

pub const OBJECT: &str = "System.Object";
pub const VALUE_TYPE: &str = "System.ValueType";
pub const ENUM: &str = "System.Enum";
pub const STRING: &str = "System.String";
pub const ARRAY: &str = "System.Array";
pub const NULLABLE: &str = "System.Nullable`1";
pub const ENUMERABLE: &str = "System.Collections.IEnumerable";
pub const GENERIC_ENUMERABLE: &str = "System.Collections.Generic.IEnumerable`1";
pub const GENERIC_COLLECTION: &str = "System.Collections.Generic.ICollection`1";
pub const GENERIC_LIST: &str = "System.Collections.Generic.IList`1";
pub const READ_ONLY_COLLECTION: &str = "System.Collections.Generic.IReadOnlyCollection`1";
pub const READ_ONLY_LIST: &str = "System.Collections.Generic.IReadOnlyList`1";
pub const LIST: &str = "System.Collections.Generic.List`1";
pub const KEY_VALUE_PAIR: &str = "System.Collections.Generic.KeyValuePair`2";
pub const EQUATABLE: &str = "System.IEquatable`1";
pub const DATE_TIME: &str = "System.DateTime";
pub const DATE_TIME_OFFSET: &str = "System.DateTimeOffset";
pub const TIME_SPAN: &str = "System.TimeSpan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    Dynamic,
    Error,
}

/// Corlib types with dedicated conversion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    Object,
    String,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
}

impl SpecialType {
    pub fn from_name(name: &str) -> Option<Self> {
        let special = match name {
            OBJECT => SpecialType::Object,
            STRING => SpecialType::String,
            "System.Boolean" => SpecialType::Boolean,
            "System.Char" => SpecialType::Char,
            "System.SByte" => SpecialType::SByte,
            "System.Byte" => SpecialType::Byte,
            "System.Int16" => SpecialType::Int16,
            "System.UInt16" => SpecialType::UInt16,
            "System.Int32" => SpecialType::Int32,
            "System.UInt32" => SpecialType::UInt32,
            "System.Int64" => SpecialType::Int64,
            "System.UInt64" => SpecialType::UInt64,
            "System.Single" => SpecialType::Single,
            "System.Double" => SpecialType::Double,
            "System.Decimal" => SpecialType::Decimal,
            _ => return None,
        };
        Some(special)
    }

    pub fn metadata_name(self) -> &'static str {
        match self {
            SpecialType::Object => OBJECT,
            SpecialType::String => STRING,
            SpecialType::Boolean => "System.Boolean",
            SpecialType::Char => "System.Char",
            SpecialType::SByte => "System.SByte",
            SpecialType::Byte => "System.Byte",
            SpecialType::Int16 => "System.Int16",
            SpecialType::UInt16 => "System.UInt16",
            SpecialType::Int32 => "System.Int32",
            SpecialType::UInt32 => "System.UInt32",
            SpecialType::Int64 => "System.Int64",
            SpecialType::UInt64 => "System.UInt64",
            SpecialType::Single => "System.Single",
            SpecialType::Double => "System.Double",
            SpecialType::Decimal => "System.Decimal",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SpecialType::Object => "object",
            SpecialType::String => "string",
            SpecialType::Boolean => "bool",
            SpecialType::Char => "char",
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Int16 => "short",
            SpecialType::UInt16 => "ushort",
            SpecialType::Int32 => "int",
            SpecialType::UInt32 => "uint",
            SpecialType::Int64 => "long",
            SpecialType::UInt64 => "ulong",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::Decimal => "decimal",
        }
    }

    /// Numeric in the sense of the framework's numeric coercion (char excluded).
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::Single
                | SpecialType::Double
                | SpecialType::Decimal
        )
    }
}

/// Reference to a type as seen on an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Metadata name, e.g. `System.Collections.Generic.List`1` or `T`.
    pub name: String,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeSymbol>,
    /// Element type for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<TypeSymbol>>,
}

impl TypeSymbol {
    pub fn named(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_arguments: Vec::new(),
            element_type: None,
        }
    }

    pub fn generic(name: impl Into<String>, kind: TypeKind, arguments: Vec<TypeSymbol>) -> Self {
        Self {
            type_arguments: arguments,
            ..Self::named(name, kind)
        }
    }

    pub fn array(element: TypeSymbol) -> Self {
        Self {
            name: format!("{}[]", element.name),
            kind: TypeKind::Array,
            type_arguments: Vec::new(),
            element_type: Some(Box::new(element)),
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self::named(name, TypeKind::TypeParameter)
    }

    pub fn error() -> Self {
        Self::named("?", TypeKind::Error)
    }

    pub fn dynamic() -> Self {
        Self::named("dynamic", TypeKind::Dynamic)
    }

    pub fn special(special: SpecialType) -> Self {
        let kind = match special {
            SpecialType::Object | SpecialType::String => TypeKind::Class,
            _ => TypeKind::Struct,
        };
        Self::named(special.metadata_name(), kind)
    }

    pub fn object() -> Self {
        Self::special(SpecialType::Object)
    }

    pub fn string() -> Self {
        Self::special(SpecialType::String)
    }

    pub fn boolean() -> Self {
        Self::special(SpecialType::Boolean)
    }

    pub fn char() -> Self {
        Self::special(SpecialType::Char)
    }

    pub fn int32() -> Self {
        Self::special(SpecialType::Int32)
    }

    pub fn int64() -> Self {
        Self::special(SpecialType::Int64)
    }

    pub fn double() -> Self {
        Self::special(SpecialType::Double)
    }

    pub fn decimal() -> Self {
        Self::special(SpecialType::Decimal)
    }

    pub fn nullable(underlying: TypeSymbol) -> Self {
        Self::generic(NULLABLE, TypeKind::Struct, vec![underlying])
    }

    pub fn enumerable() -> Self {
        Self::named(ENUMERABLE, TypeKind::Interface)
    }

    pub fn enumerable_of(element: TypeSymbol) -> Self {
        Self::generic(GENERIC_ENUMERABLE, TypeKind::Interface, vec![element])
    }

    pub fn list_of(element: TypeSymbol) -> Self {
        Self::generic(LIST, TypeKind::Class, vec![element])
    }

    pub fn special_type(&self) -> Option<SpecialType> {
        SpecialType::from_name(&self.name)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn is_numeric(&self) -> bool {
        self.special_type().is_some_and(SpecialType::is_numeric)
    }

    pub fn is_string(&self) -> bool {
        self.name == STRING
    }

    pub fn is_object(&self) -> bool {
        self.name == OBJECT
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Error, `dynamic` and unsubstituted type parameters carry no usable information.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Error | TypeKind::Dynamic | TypeKind::TypeParameter
        )
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_nullable_value_type(&self) -> bool {
        self.name == NULLABLE
    }

    /// Underlying type of `Nullable<T>`, or the type itself.
    pub fn strip_nullable(&self) -> &TypeSymbol {
        if self.is_nullable_value_type() {
            if let Some(inner) = self.type_arguments.first() {
                return inner;
            }
        }
        self
    }

    /// Replaces type parameters named in `parameters` by the matching `arguments`.
    pub fn substitute(&self, parameters: &[String], arguments: &[TypeSymbol]) -> TypeSymbol {
        if self.kind == TypeKind::TypeParameter {
            if let Some(idx) = parameters.iter().position(|p| *p == self.name) {
                if let Some(arg) = arguments.get(idx) {
                    return arg.clone();
                }
            }
            return self.clone();
        }
        if let Some(element) = &self.element_type {
            return TypeSymbol::array(element.substitute(parameters, arguments));
        }
        TypeSymbol {
            name: self.name.clone(),
            kind: self.kind,
            type_arguments: self
                .type_arguments
                .iter()
                .map(|t| t.substitute(parameters, arguments))
                .collect(),
            element_type: None,
        }
    }

    /// C#-style display name: `int`, `List<string>`, `int[]`, `double?`.
    pub fn display(&self) -> String {
        if let Some(special) = self.special_type() {
            return special.keyword().to_string();
        }
        if let Some(element) = &self.element_type {
            return format!("{}[]", element.display());
        }
        if self.is_nullable_value_type() {
            if let Some(inner) = self.type_arguments.first() {
                return format!("{}?", inner.display());
            }
        }
        let simple = self.name.rsplit('.').next().unwrap_or(&self.name);
        let simple = simple.split('`').next().unwrap_or(simple);
        if self.type_arguments.is_empty() {
            simple.to_string()
        } else {
            let args: Vec<String> = self.type_arguments.iter().map(TypeSymbol::display).collect();
            format!("{}<{}>", simple, args.join(", "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Property,
    Field,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub ty: Option<TypeSymbol>,
    #[serde(default)]
    pub is_static: bool,
}

/// User-defined `implicit operator` / `explicit operator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConversion {
    pub implicit: bool,
    pub from: TypeSymbol,
    pub to: TypeSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub base_type: Option<TypeSymbol>,
    #[serde(default)]
    pub interfaces: Vec<TypeSymbol>,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
    #[serde(default)]
    pub conversions: Vec<UserConversion>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            sealed: matches!(kind, TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate),
            members: Vec::new(),
            conversions: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Struct)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn generic(mut self, parameters: &[&str]) -> Self {
        self.type_parameters = parameters.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_base(mut self, base: TypeSymbol) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn implements(mut self, interface: TypeSymbol) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    pub fn property(mut self, name: &str, ty: TypeSymbol) -> Self {
        self.members.push(MemberDefinition {
            name: name.to_string(),
            kind: MemberKind::Property,
            ty: Some(ty),
            is_static: false,
        });
        self
    }

    pub fn conversion(mut self, implicit: bool, from: TypeSymbol, to: TypeSymbol) -> Self {
        self.conversions.push(UserConversion { implicit, from, to });
        self
    }

    /// Symbol for this definition instantiated with its own type parameters.
    pub fn as_symbol(&self) -> TypeSymbol {
        TypeSymbol::generic(
            self.name.clone(),
            self.kind,
            self.type_parameters
                .iter()
                .map(TypeSymbol::type_parameter)
                .collect(),
        )
    }
}

/// Interfaces declared `out T`, for which `IEnumerable<string>` converts to
/// `IEnumerable<object>`.
pub fn is_covariant_interface(name: &str) -> bool {
    matches!(
        name,
        GENERIC_ENUMERABLE | READ_ONLY_COLLECTION | READ_ONLY_LIST
    )
}
