use serde::{Deserialize, Serialize};

use crate::types::TypeSymbol;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    #[serde(default)]
    pub ty: Option<TypeSymbol>,
    /// Declared with `params`.
    #[serde(default)]
    pub is_params: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Method targeted by an invocation, already resolved by the host.
pub struct MethodSymbol {
    pub name: String,
    /// Fully qualified metadata name of the declaring type.
    pub containing_type: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub return_type: Option<TypeSymbol>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeSymbol>,
}

impl MethodSymbol {
    pub fn new(containing_type: impl Into<String>, name: impl Into<String>, is_static: bool) -> Self {
        Self {
            name: name.into(),
            containing_type: containing_type.into(),
            is_static,
            parameters: Vec::new(),
            return_type: None,
            type_arguments: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, names: &[&str]) -> Self {
        self.parameters = names
            .iter()
            .map(|n| ParameterSymbol {
                name: n.to_string(),
                ty: None,
                is_params: false,
            })
            .collect();
        self
    }

    pub fn returning(mut self, ty: TypeSymbol) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSymbol> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Property or field targeted by a member reference.
pub struct MemberSymbol {
    pub name: String,
    pub containing_type: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub ty: Option<TypeSymbol>,
    /// `const` fields fold to a constant value.
    #[serde(default)]
    pub is_const: bool,
}

impl MemberSymbol {
    pub fn new(containing_type: impl Into<String>, name: impl Into<String>, is_static: bool) -> Self {
        Self {
            name: name.into(),
            containing_type: containing_type.into(),
            is_static,
            ty: None,
            is_const: false,
        }
    }

    pub fn of_type(mut self, ty: TypeSymbol) -> Self {
        self.ty = Some(ty);
        self
    }
}
