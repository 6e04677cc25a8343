//! Enums mapping to SMALLINT columns.
//!
//! Each variant's discriminant is the value stored in the database, so the
//! enums are the single source of truth for goal status, goal priority and
//! board participant role.

use crate::error::CoreError;
use crate::types::StatusId;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $str:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in discriminant order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the database value.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Human-readable name used in error messages and logs.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $str ),+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl TryFrom<StatusId> for $name {
            type Error = CoreError;

            fn try_from(value: StatusId) -> Result<Self, Self::Error> {
                match value {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$( concat!(stringify!($val), " (", $str, ")") ),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Goal lifecycle status. `Archived` doubles as the goal's tombstone.
    GoalStatus ("status") {
        ToDo = 1 => "to_do",
        InProgress = 2 => "in_progress",
        Done = 3 => "done",
        Archived = 4 => "archived",
    }
}

define_status_enum! {
    /// Goal priority; higher values sort first in goal listings.
    GoalPriority ("priority") {
        Low = 1 => "low",
        Medium = 2 => "medium",
        High = 3 => "high",
        Critical = 4 => "critical",
    }
}

define_status_enum! {
    /// A participant's role on a board.
    BoardRole ("role") {
        Owner = 1 => "owner",
        Writer = 2 => "writer",
        Reader = 3 => "reader",
    }
}

impl GoalStatus {
    /// Whether a goal in this status shows up in normal listings.
    pub fn is_live(self) -> bool {
        self != GoalStatus::Archived
    }
}

impl Default for GoalStatus {
    fn default() -> Self {
        GoalStatus::ToDo
    }
}

impl Default for GoalPriority {
    fn default() -> Self {
        GoalPriority::Medium
    }
}
