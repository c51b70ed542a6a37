//! Macros that derive [`ToValue`](crate::ToValue) and
//! [`FromValue`](crate::FromValue) for plain structs and unit enums.

/// Implements `ToValue` and `FromValue` for a struct with named fields.
///
/// The struct maps to a JSON object with one member per listed field. When
/// reading, fields missing from the object keep their `Default` value.
///
/// # Examples
///
/// ```
/// use json_value::{from_str, impl_json, to_string};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Settings {
///     name: String,
///     iterations: u32,
/// }
///
/// impl Default for Settings {
///     fn default() -> Self {
///         Self {
///             name: "default".to_string(),
///             iterations: 10,
///         }
///     }
/// }
///
/// impl_json! {
///     Settings {
///         name: String,
///         iterations: u32,
///     }
/// }
///
/// let settings: Settings = from_str(r#"{"iterations": 3}"#).unwrap();
/// assert_eq!(settings.name, "default");
/// assert_eq!(settings.iterations, 3);
/// assert!(to_string(&settings).unwrap().contains(r#""iterations":3"#));
/// ```
#[macro_export]
macro_rules! impl_json {
    ($struct_name:ident { $($field:ident: $field_ty:ty),* $(,)? }) => {
        impl $crate::ToValue for $struct_name {
            fn to_value(&self) -> $crate::Value {
                let mut map = $crate::Map::new();
                $(
                    map.insert(
                        stringify!($field).to_string(),
                        $crate::ToValue::to_value(&self.$field),
                    );
                )*
                $crate::Value::Object(map)
            }
        }

        impl $crate::FromValue for $struct_name {
            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                let object = value.as_object().ok_or_else(|| {
                    $crate::JsonError::type_error(format!(
                        "Expected object for {}, found {}",
                        stringify!($struct_name),
                        value.type_name()
                    ))
                })?;

                let mut result = Self::default();
                $(
                    if let Some(field_value) = object.get(stringify!($field)) {
                        result.$field = <$field_ty as $crate::FromValue>::from_value(field_value)?;
                    }
                )*
                Ok(result)
            }
        }
    };
}

/// Implements `ToValue` and `FromValue` for an enum with unit variants,
/// represented as the variant name in a JSON string.
///
/// # Examples
///
/// ```
/// use json_value::{FromValue, ToValue, Value, impl_json_enum};
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Recursive,
///     Iterative,
/// }
///
/// impl_json_enum! {
///     Mode {
///         Recursive,
///         Iterative,
///     }
/// }
///
/// assert_eq!(Mode::Iterative.to_value(), Value::from("Iterative"));
/// assert_eq!(Mode::from_value(&Value::from("Recursive")).unwrap(), Mode::Recursive);
/// assert!(Mode::from_value(&Value::from("Lazy")).is_err());
/// ```
#[macro_export]
macro_rules! impl_json_enum {
    ($enum_name:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::ToValue for $enum_name {
            fn to_value(&self) -> $crate::Value {
                match self {
                    $(
                        $enum_name::$variant => {
                            $crate::Value::String(stringify!($variant).to_string())
                        }
                    )*
                }
            }
        }

        impl $crate::FromValue for $enum_name {
            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                let s = value.as_str().ok_or_else(|| {
                    $crate::JsonError::type_error(format!(
                        "Expected string for enum {}, found {}",
                        stringify!($enum_name),
                        value.type_name()
                    ))
                })?;

                match s {
                    $(
                        stringify!($variant) => Ok($enum_name::$variant),
                    )*
                    _ => Err($crate::JsonError::value_error(format!(
                        "Unknown variant '{}' for enum {}",
                        s,
                        stringify!($enum_name)
                    ))),
                }
            }
        }
    };
}
