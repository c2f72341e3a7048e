//! Clients and properties loaded alongside the agenda.
//!
//! The agenda does not own these entities; it only needs them to fill the
//! form dropdowns and to label events the backend did not label.

use async_trait::async_trait;

use crate::endpoints::PageRequest;
use crate::form::SelectOption;
use crate::{ApiError, Client, PagedResponse, Property};

#[async_trait(?Send)]
pub trait DirectoryGateway {
    async fn list_clients(&self, page: PageRequest) -> Result<PagedResponse<Client>, ApiError>;

    async fn list_properties(&self, page: PageRequest) -> Result<PagedResponse<Property>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub is_last_page: bool,
}

impl Pagination {
    /// The page after this one, or `None` once the last page is loaded
    pub fn next_page(&self) -> Option<PageRequest> {
        let next = self.page + 1;
        if self.is_last_page || next >= self.total_pages {
            return None;
        }
        Some(PageRequest {
            page: next,
            size: self.size,
        })
    }
}

impl<T> From<&PagedResponse<T>> for Pagination {
    fn from(response: &PagedResponse<T>) -> Self {
        Self {
            page: response.page,
            size: response.size,
            total_elements: response.total_elements,
            total_pages: response.total_pages,
            is_last_page: response.last,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryAction {
    ClientsPending,
    ClientsLoaded(PagedResponse<Client>),
    ClientsRejected(String),
    PropertiesPending,
    PropertiesLoaded(PagedResponse<Property>),
    PropertiesRejected(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryState {
    pub clients: Vec<Client>,
    pub client_pages: Pagination,
    pub properties: Vec<Property>,
    pub loading_clients: bool,
    pub loading_properties: bool,
    pub error: Option<String>,
}

impl DirectoryState {
    pub fn apply(&mut self, action: DirectoryAction) {
        match action {
            DirectoryAction::ClientsPending => {
                self.loading_clients = true;
                self.error = None;
            }
            DirectoryAction::ClientsLoaded(page) => {
                self.loading_clients = false;
                self.client_pages = Pagination::from(&page);
                // later pages extend the list loaded so far
                if page.page == 0 {
                    self.clients = page.content;
                } else {
                    self.clients.extend(page.content);
                }
            }
            DirectoryAction::ClientsRejected(message) => {
                self.loading_clients = false;
                self.error = Some(message);
            }
            DirectoryAction::PropertiesPending => {
                self.loading_properties = true;
                self.error = None;
            }
            DirectoryAction::PropertiesLoaded(page) => {
                self.loading_properties = false;
                self.properties = page.content;
            }
            DirectoryAction::PropertiesRejected(message) => {
                self.loading_properties = false;
                self.error = Some(message);
            }
        }
    }

    /// Dropdown options for the client picker
    pub fn client_options(&self) -> Vec<SelectOption> {
        self.clients
            .iter()
            .map(|client| SelectOption::new(client.id.to_string(), client.name.clone()))
            .collect()
    }

    /// Dropdown options for the property picker
    pub fn property_options(&self) -> Vec<SelectOption> {
        self.properties
            .iter()
            .map(|property| SelectOption::new(property.id.to_string(), property.title.clone()))
            .collect()
    }
}

/// Load every page of clients, stopping at the first failure
pub async fn fetch_all_clients<G, D>(gateway: &G, size: u32, dispatch: D) -> Result<(), ApiError>
where
    G: DirectoryGateway + ?Sized,
    D: Fn(DirectoryAction),
{
    let mut request = PageRequest { page: 0, size };
    loop {
        let pagination = fetch_clients(gateway, request, &dispatch).await?;
        match pagination.next_page() {
            Some(next) => request = next,
            None => return Ok(()),
        }
    }
}

/// Load one page of clients and report where it sits in the listing
pub async fn fetch_clients<G, D>(
    gateway: &G,
    page: PageRequest,
    dispatch: D,
) -> Result<Pagination, ApiError>
where
    G: DirectoryGateway + ?Sized,
    D: Fn(DirectoryAction),
{
    dispatch(DirectoryAction::ClientsPending);
    match gateway.list_clients(page).await {
        Ok(response) => {
            log::debug!("Loaded {} clients (page {})", response.content.len(), response.page);
            let pagination = Pagination::from(&response);
            dispatch(DirectoryAction::ClientsLoaded(response));
            Ok(pagination)
        }
        Err(error) => {
            log::warn!("⚠️ Failed to load clients: {}", error);
            dispatch(DirectoryAction::ClientsRejected(error.message_or("Failed to fetch clients")));
            Err(error)
        }
    }
}

pub async fn fetch_properties<G, D>(gateway: &G, page: PageRequest, dispatch: D) -> Result<(), ApiError>
where
    G: DirectoryGateway + ?Sized,
    D: Fn(DirectoryAction),
{
    dispatch(DirectoryAction::PropertiesPending);
    match gateway.list_properties(page).await {
        Ok(response) => {
            log::debug!("Loaded {} properties", response.content.len());
            dispatch(DirectoryAction::PropertiesLoaded(response));
            Ok(())
        }
        Err(error) => {
            log::warn!("⚠️ Failed to load properties: {}", error);
            dispatch(DirectoryAction::PropertiesRejected(
                error.message_or("Failed to fetch properties"),
            ));
            Err(error)
        }
    }
}
