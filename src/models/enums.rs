use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Wire representation is the snake_case string used by the backend.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(EngineError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DataSource {
    Bordereaux => "bordereaux",
    Reclamations => "reclamations",
    Virements => "virements",
});

str_enum!(ChartType {
    Line => "line",
    Bar => "bar",
    Pie => "pie",
});

str_enum!(FilterOperator {
    Equals => "equals",
    NotEquals => "not_equals",
    Contains => "contains",
    GreaterThan => "greater_than",
    LessThan => "less_than",
    In => "in",
});

str_enum!(FilterDataType {
    String => "string",
    Number => "number",
    Date => "date",
    Boolean => "boolean",
});

str_enum!(SlaLevel {
    Green => "green",
    Orange => "orange",
    Red => "red",
});
