//! Who may see a piece of content.
//!
//! Content is shown when it is active and, if flagged members-only, the
//! viewer is an authenticated member. [`Visible`] answers that for a loaded
//! model, [`Gated::visible_to`] narrows a query the same way so listings
//! never load what they may not show.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};

use crate::entity::{
    course, event, historical_document, library_item, material, menu_item, page, publication,
};

/// Who is looking at the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viewer {
    Public,
    Member,
}

impl Viewer {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            Viewer::Member
        } else {
            Viewer::Public
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, Viewer::Member)
    }
}

pub fn visible(is_active: bool, members_only: bool, viewer: Viewer) -> bool {
    is_active && (viewer.is_member() || !members_only)
}

pub trait Visible {
    fn is_active(&self) -> bool;
    fn members_only(&self) -> bool;

    fn visible_to(&self, viewer: Viewer) -> bool {
        visible(self.is_active(), self.members_only(), viewer)
    }
}

pub trait Gated: EntityTrait {
    fn active_column() -> Self::Column;
    fn members_only_column() -> Self::Column;

    fn visible_to(select: Select<Self>, viewer: Viewer) -> Select<Self> {
        let select = select.filter(Self::active_column().eq(true));
        match viewer {
            Viewer::Member => select,
            Viewer::Public => select.filter(Self::members_only_column().eq(false)),
        }
    }

    /// Visible rows of the entity.
    fn find_visible(viewer: Viewer) -> Select<Self> {
        Self::visible_to(Self::find(), viewer)
    }
}

macro_rules! gate {
    ($module:ident, $column:ident, $field:ident) => {
        impl Gated for $module::Entity {
            fn active_column() -> Self::Column {
                $module::Column::$column
            }

            fn members_only_column() -> Self::Column {
                $module::Column::MembersOnly
            }
        }

        impl Visible for $module::Model {
            fn is_active(&self) -> bool {
                self.$field
            }

            fn members_only(&self) -> bool {
                self.members_only
            }
        }
    };
}

gate!(page, IsActive, is_active);
gate!(publication, IsActive, is_active);
gate!(course, IsActive, is_active);
gate!(event, IsActive, is_active);
gate!(material, IsActive, is_active);
gate!(historical_document, IsActive, is_active);
gate!(menu_item, IsActive, is_active);
gate!(library_item, IsAvailable, is_available);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewer() -> impl Strategy<Value = Viewer> {
        prop_oneof![Just(Viewer::Public), Just(Viewer::Member)]
    }

    proptest! {
        #[test]
        fn inactive_content_is_never_visible(members_only in any::<bool>(), viewer in viewer()) {
            prop_assert!(!visible(false, members_only, viewer));
        }

        #[test]
        fn members_see_everything_active(members_only in any::<bool>()) {
            prop_assert!(visible(true, members_only, Viewer::Member));
        }

        #[test]
        fn public_sees_only_open_content(is_active in any::<bool>(), members_only in any::<bool>()) {
            prop_assert_eq!(
                visible(is_active, members_only, Viewer::Public),
                is_active && !members_only
            );
        }
    }

    #[tokio::test]
    async fn test_gated_query_matches_predicate() {
        use crate::{entity::prelude::*, test_utils};

        let db = test_utils::setup_test_db().await;
        for is_active in [false, true] {
            for members_only in [false, true] {
                let mut page = test_utils::page(&format!("p-{is_active}-{members_only}"));
                page.is_active = Set(is_active);
                page.members_only = Set(members_only);
                page.insert(&db).await.unwrap();

                let mut item = test_utils::library_item(&format!("l-{is_active}-{members_only}"));
                item.is_available = Set(is_active);
                item.members_only = Set(members_only);
                item.insert(&db).await.unwrap();
            }
        }

        for viewer in [Viewer::Public, Viewer::Member] {
            let all_pages = Page::find().all(&db).await.unwrap();
            let mut expected: Vec<_> = all_pages
                .iter()
                .filter(|page| page.visible_to(viewer))
                .map(|page| page.slug.clone())
                .collect();
            let mut found: Vec<_> = Page::find_visible(viewer)
                .all(&db)
                .await
                .unwrap()
                .into_iter()
                .map(|page| page.slug)
                .collect();
            expected.sort();
            found.sort();
            assert_eq!(found, expected, "pages for {viewer:?}");

            let all_items = LibraryItem::find().all(&db).await.unwrap();
            let expected = all_items.iter().filter(|item| item.visible_to(viewer)).count();
            let found = LibraryItem::find_visible(viewer).count(&db).await.unwrap();
            assert_eq!(found as usize, expected, "library items for {viewer:?}");
        }
    }

    #[test]
    fn test_viewer_from_authentication() {
        assert_eq!(Viewer::from_authenticated(true), Viewer::Member);
        assert_eq!(Viewer::from_authenticated(false), Viewer::Public);
    }
}
