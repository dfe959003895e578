//! Type references as written in declarations.
//!
//! A [`TypeName`] keeps the normalised source text plus a structural
//! [`TypeNameKind`]. Sugar and spelled-out forms normalise to the same kind:
//! `[Int]` and `Array<Int>` are both [`TypeNameKind::Array`].

use serde::{Deserialize, Serialize};

use super::ids::TypeId;
use super::symbols::Attribute;

/// A reference to a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeName {
    /// Normalised text without attributes or `inout`, e.g. `[String: Int]?`
    pub name: String,
    pub kind: TypeNameKind,
    /// `@escaping`, `@Sendable`, ...
    pub attributes: Vec<Attribute>,
    pub is_inout: bool,
    /// Set when the name refers to a generic parameter in scope
    pub is_generic_parameter: bool,
    /// The composed type this name resolves to
    pub resolved: Option<TypeId>,
    /// For names resolving through a typealias: the aliased type
    pub actual: Option<Box<TypeName>>,
}

/// Structural shape of a type reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNameKind {
    /// `Foo`, `Swift.Result<A, B>`; `base` excludes generic arguments
    Named {
        base: String,
        generic_args: Vec<TypeName>,
    },
    Optional(Box<TypeName>),
    ImplicitlyUnwrapped(Box<TypeName>),
    Array(Box<TypeName>),
    Dictionary {
        key: Box<TypeName>,
        value: Box<TypeName>,
    },
    Set(Box<TypeName>),
    Tuple(Vec<TupleElement>),
    Closure(ClosureType),
    /// `A & B`
    Composition(Vec<TypeName>),
    /// `T.Type` / `T.Protocol`
    Metatype(Box<TypeName>),
    /// `some P`
    Opaque(Box<TypeName>),
    /// `any P`
    Existential(Box<TypeName>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleElement {
    pub label: Option<String>,
    pub type_name: TypeName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureType {
    pub parameters: Vec<TypeName>,
    pub return_type: Box<TypeName>,
    pub is_async: bool,
    pub throws: bool,
}

impl TypeName {
    fn with_kind(name: String, kind: TypeNameKind) -> Self {
        Self {
            name,
            kind,
            attributes: Vec::new(),
            is_inout: false,
            is_generic_parameter: false,
            resolved: None,
            actual: None,
        }
    }

    /// A plain named type; spelled-out standard containers normalise to sugar kinds.
    pub fn named(base: impl Into<String>, generic_args: Vec<TypeName>) -> Self {
        let base = base.into();
        let name = if generic_args.is_empty() {
            base.clone()
        } else {
            let args: Vec<_> = generic_args.iter().map(|a| a.name.as_str()).collect();
            format!("{}<{}>", base, args.join(", "))
        };
        let simple = base.strip_prefix("Swift.").unwrap_or(&base);
        let mut args = generic_args.clone().into_iter();
        let kind = match (simple, generic_args.len()) {
            ("Array", 1) => args.next().map(|a| TypeNameKind::Array(Box::new(a))),
            ("Set", 1) => args.next().map(|a| TypeNameKind::Set(Box::new(a))),
            ("Optional", 1) => args.next().map(|a| TypeNameKind::Optional(Box::new(a))),
            ("ImplicitlyUnwrappedOptional", 1) => args
                .next()
                .map(|a| TypeNameKind::ImplicitlyUnwrapped(Box::new(a))),
            ("Dictionary", 2) => match (args.next(), args.next()) {
                (Some(key), Some(value)) => Some(TypeNameKind::Dictionary {
                    key: Box::new(key),
                    value: Box::new(value),
                }),
                _ => None,
            },
            _ => None,
        };
        let kind = kind.unwrap_or(TypeNameKind::Named { base, generic_args });
        Self::with_kind(name, kind)
    }

    pub fn optional(inner: TypeName) -> Self {
        Self::with_kind(format!("{}?", inner.name), TypeNameKind::Optional(Box::new(inner)))
    }

    pub fn implicitly_unwrapped(inner: TypeName) -> Self {
        Self::with_kind(
            format!("{}!", inner.name),
            TypeNameKind::ImplicitlyUnwrapped(Box::new(inner)),
        )
    }

    pub fn array(element: TypeName) -> Self {
        Self::with_kind(format!("[{}]", element.name), TypeNameKind::Array(Box::new(element)))
    }

    pub fn dictionary(key: TypeName, value: TypeName) -> Self {
        Self::with_kind(
            format!("[{}: {}]", key.name, value.name),
            TypeNameKind::Dictionary {
                key: Box::new(key),
                value: Box::new(value),
            },
        )
    }

    pub fn tuple(elements: Vec<TupleElement>) -> Self {
        let parts: Vec<_> = elements
            .iter()
            .map(|e| match &e.label {
                Some(label) => format!("{}: {}", label, e.type_name.name),
                None => e.type_name.name.clone(),
            })
            .collect();
        Self::with_kind(format!("({})", parts.join(", ")), TypeNameKind::Tuple(elements))
    }

    pub fn closure(closure: ClosureType) -> Self {
        let params: Vec<_> = closure.parameters.iter().map(|p| p.display()).collect();
        let mut name = format!("({})", params.join(", "));
        if closure.is_async {
            name.push_str(" async");
        }
        if closure.throws {
            name.push_str(" throws");
        }
        name.push_str(" -> ");
        name.push_str(&closure.return_type.display());
        Self::with_kind(name, TypeNameKind::Closure(closure))
    }

    pub fn composition(parts: Vec<TypeName>) -> Self {
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        Self::with_kind(names.join(" & "), TypeNameKind::Composition(parts))
    }

    pub fn metatype(inner: TypeName, suffix: &str) -> Self {
        Self::with_kind(
            format!("{}.{}", inner.name, suffix),
            TypeNameKind::Metatype(Box::new(inner)),
        )
    }

    pub fn opaque(inner: TypeName) -> Self {
        Self::with_kind(format!("some {}", inner.name), TypeNameKind::Opaque(Box::new(inner)))
    }

    pub fn existential(inner: TypeName) -> Self {
        Self::with_kind(format!("any {}", inner.name), TypeNameKind::Existential(Box::new(inner)))
    }

    /// Text including attributes and `inout`, as it would be written.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for attribute in &self.attributes {
            out.push('@');
            out.push_str(&attribute.name);
            if let Some(args) = &attribute.arguments {
                out.push('(');
                out.push_str(args);
                out.push(')');
            }
            out.push(' ');
        }
        if self.is_inout {
            out.push_str("inout ");
        }
        out.push_str(&self.name);
        out
    }

    /// Base name of a named type, e.g. `Foo.Bar` for `Foo.Bar<Int>`.
    pub fn base_name(&self) -> Option<&str> {
        match &self.kind {
            TypeNameKind::Named { base, .. } => Some(base),
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self.kind,
            TypeNameKind::Optional(_) | TypeNameKind::ImplicitlyUnwrapped(_)
        )
    }

    pub fn is_closure(&self) -> bool {
        matches!(self.kind, TypeNameKind::Closure(_))
    }

    /// The type with any optional wrapping removed.
    pub fn unwrapped(&self) -> &TypeName {
        match &self.kind {
            TypeNameKind::Optional(inner) | TypeNameKind::ImplicitlyUnwrapped(inner) => {
                inner.unwrapped()
            }
            _ => self,
        }
    }

    /// Visit this name and every nested name, parents before children.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut TypeName)) {
        f(self);
        match &mut self.kind {
            TypeNameKind::Named { generic_args, .. } => {
                for arg in generic_args {
                    arg.walk_mut(f);
                }
            }
            TypeNameKind::Optional(inner)
            | TypeNameKind::ImplicitlyUnwrapped(inner)
            | TypeNameKind::Array(inner)
            | TypeNameKind::Set(inner)
            | TypeNameKind::Metatype(inner)
            | TypeNameKind::Opaque(inner)
            | TypeNameKind::Existential(inner) => inner.walk_mut(f),
            TypeNameKind::Dictionary { key, value } => {
                key.walk_mut(f);
                value.walk_mut(f);
            }
            TypeNameKind::Tuple(elements) => {
                for element in elements {
                    element.type_name.walk_mut(f);
                }
            }
            TypeNameKind::Closure(closure) => {
                for param in &mut closure.parameters {
                    param.walk_mut(f);
                }
                closure.return_type.walk_mut(f);
            }
            TypeNameKind::Composition(parts) => {
                for part in parts {
                    part.walk_mut(f);
                }
            }
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelled_out_containers_normalise() {
        let int = TypeName::named("Int", vec![]);
        let array = TypeName::named("Array", vec![int.clone()]);
        assert!(matches!(array.kind, TypeNameKind::Array(_)));
        assert_eq!(array.name, "Array<Int>");

        let dict = TypeName::named("Swift.Dictionary", vec![int.clone(), int.clone()]);
        assert!(matches!(dict.kind, TypeNameKind::Dictionary { .. }));

        let optional = TypeName::named("Optional", vec![int]);
        assert!(optional.is_optional());
    }

    #[test]
    fn test_sugar_names() {
        let int = TypeName::named("Int", vec![]);
        let string = TypeName::named("String", vec![]);
        assert_eq!(TypeName::optional(TypeName::dictionary(string, int.clone())).name, "[String: Int]?");
        let closure = TypeName::closure(ClosureType {
            parameters: vec![int.clone()],
            return_type: Box::new(TypeName::named("Void", vec![])),
            is_async: true,
            throws: true,
        });
        assert_eq!(closure.name, "(Int) async throws -> Void");
    }

    #[test]
    fn test_walk_mut_visits_nested() {
        let int = TypeName::named("Int", vec![]);
        let mut ty = TypeName::optional(TypeName::array(int));
        let mut seen = Vec::new();
        ty.walk_mut(&mut |t| seen.push(t.name.clone()));
        assert_eq!(seen, vec!["[Int]?", "[Int]", "Int"]);
    }
}
