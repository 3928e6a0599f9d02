/// Declares a closed identifier enum.
///
/// Each variant has a stable id (used for serde and `Display`), a display
/// name, and optional aliases. `FromStr` accepts any of the three,
/// ignoring ASCII case.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $id:literal : $display_name:literal
                $( | $alias:literal )*
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $enum_name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            pub fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)*
                }
            }

            pub fn display_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $display_name,)*
                }
            }

            fn names(self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => &[$id, $display_name $(, $alias)*],)*
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.names().iter().any(|n| n.eq_ignore_ascii_case(s)))
                    .ok_or_else(|| format!("unknown {}: {}", stringify!($enum_name), s))
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.id())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
