use uuid::Uuid;

use crate::domain::repository::ShoppingListSource;
use crate::domain::shopping_list::ShoppingList;
use crate::error::RecipesServiceError;

pub struct DownloadShoppingListUseCase<S: ShoppingListSource> {
    pub repo: S,
}

impl<S: ShoppingListSource> DownloadShoppingListUseCase<S> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ShoppingList, RecipesServiceError> {
        let rows = self.repo.shopping_list_rows(user_id).await?;
        Ok(ShoppingList::from_rows(rows))
    }
}
