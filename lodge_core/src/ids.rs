//! Typed primary keys. Every table is keyed by a UUIDv7 so ids sort by
//! creation time and can travel in URLs as plain strings.

use std::{fmt, str::FromStr};

use sea_orm::{
    sea_query::{ArrayType, Nullable, ValueType, ValueTypeErr},
    ColIdx, ColumnType, DbErr, QueryResult, TryFromU64, TryGetError, TryGetable, Value,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lets an id newtype sit in a sea-orm column, including as a primary key.
macro_rules! uuid_column {
    ($name:ident) => {
        impl From<$name> for Value {
            fn from(id: $name) -> Self {
                Value::Uuid(Some(Box::new(id.0)))
            }
        }

        impl TryGetable for $name {
            fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> Result<Self, TryGetError> {
                <Uuid as TryGetable>::try_get_by(res, idx).map($name)
            }
        }

        impl ValueType for $name {
            fn try_from(value: Value) -> Result<Self, ValueTypeErr> {
                <Uuid as ValueType>::try_from(value).map($name)
            }

            fn type_name() -> String {
                stringify!($name).to_owned()
            }

            fn array_type() -> ArrayType {
                ArrayType::Uuid
            }

            fn column_type() -> ColumnType {
                ColumnType::Uuid
            }
        }

        impl Nullable for $name {
            fn null() -> Value {
                Value::Uuid(None)
            }
        }

        impl TryFromU64 for $name {
            fn try_from_u64(_: u64) -> Result<Self, DbErr> {
                Err(DbErr::ConvertFromU64(stringify!($name)))
            }
        }
    };
}

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parses the hyphenated form found in paths and headers.
            pub fn parse_str(raw: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::parse_str(raw)
            }
        }

        uuid_column!($name);
    };
}

define_id!(SiteConfigId);
define_id!(MenuItemId);
define_id!(PageId);
define_id!(SectionId);
define_id!(RankId);
define_id!(PositionId);
define_id!(MemberId);
define_id!(CourseId);
define_id!(MaterialId);
define_id!(LibraryItemId);
define_id!(EventId);
define_id!(MeetingId);
define_id!(PublicationId);
define_id!(CategoryId);
define_id!(StatisticId);
define_id!(HistoricalEventId);
define_id!(HistoricalDocumentId);
define_id!(QuoteId);
define_id!(CarouselSlideId);
define_id!(TestimonialId);
define_id!(PrincipleId);
define_id!(ActivityId);
define_id!(ContactMessageId);
define_id!(ContactChannelId);
define_id!(OfficeHoursId);
define_id!(SisterLodgeId);
define_id!(HistoricalImageId);
