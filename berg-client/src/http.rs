//! HTTP client for the Cuisineberg backend API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{HealthReport, ImageUploadResponse, LoginResponse, UserInfo};
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, MenuSnapshot, Order, OrderDraft, OrderStatus,
    OrderStatusUpdate, Restaurant, RestaurantUpdate,
};
use shared::response::ApiResponse;

/// HTTP client for making network requests to the Cuisineberg backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.put(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.delete(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Unwrap an API envelope, expecting data
    fn take_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
        if !resp.is_success() {
            return Err(ClientError::Backend {
                code: resp.code,
                message: resp.message,
            });
        }
        resp.data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    /// Unwrap an API envelope with no expected data
    fn take_unit(resp: ApiResponse<serde_json::Value>) -> ClientResult<()> {
        if !resp.is_success() {
            return Err(ClientError::Backend {
                code: resp.code,
                message: resp.message,
            });
        }
        Ok(())
    }

    // ========== Health API ==========

    /// Readiness probe, consulted before opening the order feed
    pub async fn health(&self) -> ClientResult<HealthReport> {
        self.get::<ApiResponse<HealthReport>>("/api/health")
            .await
            .and_then(|r| Self::take_data(r, "health"))
    }

    // ========== Auth API ==========

    /// Login with email and password
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = shared::client::LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let login = self
            .post::<ApiResponse<LoginResponse>, _>("/api/auth/login", &request)
            .await
            .and_then(|r| Self::take_data(r, "login"))?;

        self.token = Some(login.token.clone());
        Ok(login)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get::<ApiResponse<UserInfo>>("/api/auth/me")
            .await
            .and_then(|r| Self::take_data(r, "user"))
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        let resp = self
            .post_empty::<ApiResponse<serde_json::Value>>("/api/auth/logout")
            .await?;
        self.token = None;
        Self::take_unit(resp)
    }

    // ========== Public Menu API ==========

    /// Fetch a restaurant's menu snapshot by public code
    pub async fn fetch_menu(&self, public_code: &str) -> ClientResult<MenuSnapshot> {
        self.get::<ApiResponse<MenuSnapshot>>(&format!(
            "/api/public/restaurants/{}/menu",
            public_code
        ))
        .await
        .and_then(|r| Self::take_data(r, "menu"))
    }

    // ========== Order API ==========

    /// Place a new order (customer checkout)
    pub async fn place_order(&self, draft: &OrderDraft) -> ClientResult<Order> {
        self.post::<ApiResponse<Order>, _>("/api/orders", draft)
            .await
            .and_then(|r| Self::take_data(r, "order"))
    }

    /// Fetch the current order list (retail session)
    pub async fn fetch_orders(&self) -> ClientResult<Vec<Order>> {
        self.get::<ApiResponse<Vec<Order>>>("/api/orders")
            .await
            .and_then(|r| Self::take_data(r, "orders"))
    }

    /// Cancel an order (deletion semantics)
    pub async fn cancel_order(&self, order_id: &str) -> ClientResult<()> {
        self.delete::<ApiResponse<serde_json::Value>>(&format!("/api/orders/{}", order_id))
            .await
            .and_then(Self::take_unit)
    }

    /// Progress an order's status (update semantics)
    pub async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> ClientResult<()> {
        let payload = OrderStatusUpdate { status };
        self.put::<ApiResponse<serde_json::Value>, _>(
            &format!("/api/orders/{}/status", order_id),
            &payload,
        )
        .await
        .and_then(Self::take_unit)
    }

    // ========== Menu Management API ==========

    /// List the authenticated restaurant's menu items
    pub async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.get::<ApiResponse<Vec<MenuItem>>>("/api/menu/items")
            .await
            .and_then(|r| Self::take_data(r, "menu items"))
    }

    /// Create a menu item
    pub async fn create_menu_item(&self, payload: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.post::<ApiResponse<MenuItem>, _>("/api/menu/items", payload)
            .await
            .and_then(|r| Self::take_data(r, "menu item"))
    }

    /// Update a menu item
    pub async fn update_menu_item(
        &self,
        item_id: &str,
        payload: &MenuItemUpdate,
    ) -> ClientResult<MenuItem> {
        self.put::<ApiResponse<MenuItem>, _>(&format!("/api/menu/items/{}", item_id), payload)
            .await
            .and_then(|r| Self::take_data(r, "menu item"))
    }

    /// Delete a menu item
    pub async fn delete_menu_item(&self, item_id: &str) -> ClientResult<()> {
        self.delete::<ApiResponse<serde_json::Value>>(&format!("/api/menu/items/{}", item_id))
            .await
            .and_then(Self::take_unit)
    }

    // ========== Profile API ==========

    /// Fetch the authenticated restaurant's profile
    pub async fn fetch_restaurant(&self) -> ClientResult<Restaurant> {
        self.get::<ApiResponse<Restaurant>>("/api/restaurant")
            .await
            .and_then(|r| Self::take_data(r, "restaurant"))
    }

    /// Update the authenticated restaurant's profile
    pub async fn update_restaurant(&self, payload: &RestaurantUpdate) -> ClientResult<Restaurant> {
        self.put::<ApiResponse<Restaurant>, _>("/api/restaurant", payload)
            .await
            .and_then(|r| Self::take_data(r, "restaurant"))
    }

    // ========== Upload API ==========

    /// Upload a single image, returning its resolvable URL
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<ImageUploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(self.url("/api/images")).multipart(form);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response::<ApiResponse<ImageUploadResponse>>(response)
            .await
            .and_then(|r| Self::take_data(r, "image"))
    }
}
