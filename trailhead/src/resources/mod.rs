//! Resource catalogue of the booking backend
//!
//! One module per resource kind. Each provides the typed record returned by
//! the backend, the payload accepted by create/update, the status enums used
//! as filters, a [`ResourceDescriptor`](crate::listing::ResourceDescriptor)
//! and a marker type implementing [`Resource`](crate::client::Resource).
//!
//! Records implement [`Record`](crate::listing::Record), so the same types
//! work with server-paged [`ResourceClient`](crate::client::ResourceClient)
//! calls and with locally held [`ListView`](crate::listing::ListView)
//! snapshots.
//!
//! | marker                | path              | record          |
//! |-----------------------|-------------------|-----------------|
//! | [`Mountains`]         | `mountains`       | [`Mountain`]    |
//! | [`Rangers`]           | `rangers`         | [`Ranger`]      |
//! | [`Routes`]            | `routes`          | [`Route`]       |
//! | [`MountainRoutes`]    | `mountain-routes` | [`MountainRoute`] |
//! | [`Transactions`]      | `transactions`    | [`Transaction`] |
//! | [`Users`]             | `users`           | [`User`]        |
//! | [`Hikers`]            | `hikers`          | [`Hiker`]       |

/// Declares a string enum sent over the wire in SCREAMING_SNAKE_CASE,
/// usable as a filter value and as a record field value.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Wire representation
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::listing::FilterValue {
            fn from(value: $name) -> Self {
                $crate::listing::FilterValue::String(value.as_str().to_string())
            }
        }

        impl From<$name> for $crate::listing::FieldValue<'_> {
            fn from(value: $name) -> Self {
                $crate::listing::FieldValue::Text(std::borrow::Cow::Borrowed(value.as_str()))
            }
        }
    };
}

mod hiker;
mod mountain;
mod mountain_route;
mod ranger;
mod route;
mod transaction;
mod user;

pub use hiker::{ExperienceLevel, Hiker, HikerPayload, Hikers};
pub use mountain::{Mountain, MountainPayload, MountainStatus, Mountains};
pub use mountain_route::{MountainRoute, MountainRoutePayload, MountainRoutes};
pub use ranger::{Ranger, RangerPayload, RangerStatus, Rangers};
pub use route::{Difficulty, Route, RoutePayload, Routes};
pub use transaction::{PaymentMethod, Transaction, TransactionPayload, TransactionStatus, Transactions};
pub use user::{User, UserPayload, UserRole, UserStatus, Users};
