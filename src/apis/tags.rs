use crate::{
    client::LakeFsClient,
    error::{LakeFsError, LakeFsResult},
    models::{Ref, RefList, TagCreation},
    operation::{CREATE_TAG, DELETE_TAG, GET_TAG, LIST_TAGS},
    request::Params,
};
use log::{debug, info};

/// Page size bounds accepted by list operations; -1 asks for the server default
const MIN_AMOUNT: i32 = -1;
const MAX_AMOUNT: i32 = 1000;

/// Tags API operations
pub struct TagsApi<'a> {
    client: &'a LakeFsClient,
}

impl<'a> TagsApi<'a> {
    pub fn new(client: &'a LakeFsClient) -> Self {
        Self { client }
    }

    /// Create a tag
    ///
    /// # Arguments
    /// * `repository` - Repository name
    /// * `tag` - Tag id and the reference it points to
    pub async fn create_tag(&self, repository: &str, tag: &TagCreation) -> LakeFsResult<Ref> {
        info!("Creating tag {} -> {} in repository: {}", tag.id, tag.reference, repository);
        let params = Params::new().path("repository", repository).json_body(tag)?;

        self.client.invoke(&CREATE_TAG, params).await
    }

    /// Delete a tag
    ///
    /// # Arguments
    /// * `repository` - Repository name
    /// * `tag` - Tag id
    pub async fn delete_tag(&self, repository: &str, tag: &str) -> LakeFsResult<()> {
        info!("Deleting tag {} in repository: {}", tag, repository);
        let params = Params::new()
            .path("repository", repository)
            .path("tag", tag);

        self.client.invoke_empty(&DELETE_TAG, params).await?;
        Ok(())
    }

    /// Get a tag
    ///
    /// # Arguments
    /// * `repository` - Repository name
    /// * `tag` - Tag id
    pub async fn get_tag(&self, repository: &str, tag: &str) -> LakeFsResult<Ref> {
        info!("Getting tag {} in repository: {}", tag, repository);
        let params = Params::new()
            .path("repository", repository)
            .path("tag", tag);

        self.client.invoke(&GET_TAG, params).await
    }

    /// List tags, one page at a time
    ///
    /// # Arguments
    /// * `repository` - Repository name
    /// * `after` - Return items after this value (`pagination.next_offset` of the previous page)
    /// * `amount` - Page size, -1 to 1000; the server default is 100
    pub async fn list_tags(
        &self,
        repository: &str,
        after: Option<&str>,
        amount: Option<i32>,
    ) -> LakeFsResult<RefList> {
        info!("Listing tags in repository: {}", repository);
        if let Some(amount) = amount {
            if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
                return Err(LakeFsError::invalid_param(format!(
                    "amount must be between {} and {}, got {}",
                    MIN_AMOUNT, MAX_AMOUNT, amount
                )));
            }
        }
        debug!("Pagination after={:?} amount={:?}", after, amount);

        let params = Params::new()
            .path("repository", repository)
            .query_opt("after", after)
            .query_opt("amount", amount);

        self.client.invoke(&LIST_TAGS, params).await
    }
}
