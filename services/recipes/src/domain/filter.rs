//! Recipe list predicates derived from query parameters and the viewer.

use uuid::Uuid;

use crate::domain::types::Viewer;

/// Restrict recipes by membership in one of the viewer's relation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipFilter {
    pub user_id: Uuid,
    /// `true` keeps members only, `false` drops them.
    pub include: bool,
}

/// AND-combined recipe predicates. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<Uuid>,
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub favorited: Option<MembershipFilter>,
    pub in_shopping_cart: Option<MembershipFilter>,
}

impl RecipeFilter {
    /// Build the filter for `viewer`. Favorite and cart flags are ignored for anonymous viewers.
    pub fn new(
        viewer: &Viewer,
        author: Option<Uuid>,
        tags: Vec<String>,
        is_favorited: Option<bool>,
        is_in_shopping_cart: Option<bool>,
    ) -> Self {
        let membership = |flag: Option<bool>| {
            let user_id = viewer.user_id()?;
            flag.map(|include| MembershipFilter { user_id, include })
        };
        let mut tags: Vec<String> = tags.into_iter().filter(|t| !t.is_empty()).collect();
        tags.sort();
        tags.dedup();
        Self {
            author,
            tags,
            favorited: membership(is_favorited),
            in_shopping_cart: membership(is_in_shopping_cart),
        }
    }
}
