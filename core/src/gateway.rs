//! The three domain operations the controller needs, as a trait.
//!
//! `HttpGateway` is the production implementation: it pairs the stateless
//! `PostsClient` with a `Transport`. Tests substitute scripted gateways.

use std::sync::Arc;

use crate::client::PostsClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewPost, Post, PostId};

pub trait PostsGateway {
    fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    fn create_post(&self, input: &NewPost) -> Result<Post, ApiError>;

    /// Returns the id the backend acknowledged as deleted.
    fn delete_post(&self, id: PostId) -> Result<PostId, ApiError>;
}

impl<G: PostsGateway + ?Sized> PostsGateway for &G {
    fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        (**self).list_posts()
    }

    fn create_post(&self, input: &NewPost) -> Result<Post, ApiError> {
        (**self).create_post(input)
    }

    fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        (**self).delete_post(id)
    }
}

impl<G: PostsGateway + ?Sized> PostsGateway for Arc<G> {
    fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        (**self).list_posts()
    }

    fn create_post(&self, input: &NewPost) -> Result<Post, ApiError> {
        (**self).create_post(input)
    }

    fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        (**self).delete_post(id)
    }
}

#[derive(Debug, Clone)]
pub struct HttpGateway<T> {
    client: PostsClient,
    transport: T,
}

impl<T: Transport> HttpGateway<T> {
    pub fn new(client: PostsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PostsClient {
        &self.client
    }
}

impl HttpGateway<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PostsClient::with_envelope(&config.api_base_url, config.list_envelope),
            UreqTransport::new(config.timeout),
        )
    }
}

impl<T: Transport> PostsGateway for HttpGateway<T> {
    fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.transport.execute(self.client.build_list_posts())?;
        self.client.parse_list_posts(response)
    }

    fn create_post(&self, input: &NewPost) -> Result<Post, ApiError> {
        let request = self.client.build_create_post(input)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_post(response)
    }

    fn delete_post(&self, id: PostId) -> Result<PostId, ApiError> {
        let response = self.transport.execute(self.client.build_delete_post(id))?;
        self.client.parse_delete_post(id, response)
    }
}
