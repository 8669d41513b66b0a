use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variants serialize as their wire string so typed decodes of model
/// output enforce membership.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $s)]
                $variant
            ),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(AlertType {
    Error => "error",
    Warning => "warning",
    Info => "info",
});

str_enum!(AlertCategory {
    Dosage => "dosage",
    Interaction => "interaction",
    Allergy => "allergy",
    Duplicate => "duplicate",
    Compliance => "compliance",
    Contraindication => "contraindication",
});

str_enum!(AlertSeverity {
    High => "high",
    Medium => "medium",
    Low => "low",
});

str_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});
