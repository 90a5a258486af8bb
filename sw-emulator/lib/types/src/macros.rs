/*++

Licensed under the Apache-2.0 license.

File Name:

    macros.rs

Abstract:

    Macros used by the project

--*/

/// Declares a fieldless enum whose variants map one-to-one onto values of
/// an integer type.
///
/// Generates `From<Enum> for $type`, `TryFrom<$type> for Enum` (the
/// unmatched value is handed back as the error) and `Display`.
#[macro_export]
macro_rules! bus_enum {
    (
        $(#[$($enum_attrs:tt)*])*
        $vis:vis $enum_name:ident;
        $type:ty;
        {
            $(
                $(#[$($attrs:tt)*])*
                $name:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$($enum_attrs)*])*
        $vis enum $enum_name {
            $(
                $(#[$($attrs)*])*
                $name,
            )*
        }

        impl $enum_name {
            /// All variants, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$name,)*];
        }

        impl From<$enum_name> for $type {
            fn from(val: $enum_name) -> $type {
                match val {
                    $($enum_name::$name => $value,)*
                }
            }
        }

        impl TryFrom<$type> for $enum_name {
            type Error = $type;

            fn try_from(val: $type) -> Result<$enum_name, $type> {
                match val {
                    $($value => Ok($enum_name::$name),)*
                    _ => Err(val),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", <$type>::from(*self))
            }
        }
    };
}
