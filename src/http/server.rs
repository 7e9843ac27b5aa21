use log::info;
use rouille::{Request, Response};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    config::HttpConfig,
    domain::favorite::{FavoriteDraft, FavoritePatch},
    http::error::ApiError,
    storage::{albums::AlbumCatalog, favorites::FavoriteStore},
};

pub struct HttpServer {
    favorites: Arc<FavoriteStore>,
    catalog: Arc<AlbumCatalog>,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(favorites: FavoriteStore, catalog: AlbumCatalog, config: HttpConfig) -> Self {
        Self {
            favorites: Arc::new(favorites),
            catalog: Arc::new(catalog),
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (GET) (/) => {
                self.handle_index()
            },

            (GET) (/albums) => {
                self.handle_list_albums()
            },

            (GET) (/albums/{id: u64}) => {
                self.handle_get_album(id)
            },

            (GET) (/favorites) => {
                self.handle_list_favorites()
            },

            (POST) (/favorites) => {
                self.handle_create_favorite(request)
            },

            (PATCH) (/favorites/{id: u64}) => {
                self.handle_update_favorite(id, request)
            },

            (DELETE) (/favorites/{id: u64}) => {
                self.handle_delete_favorite(id)
            },

            _ => Response::empty_404()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn handle_index(&self) -> Response {
        let count = match self.catalog.list() {
            Ok(albums) => albums.len(),
            Err(e) => return ApiError::from(e).into_response(),
        };

        Response::json(&IndexResponse {
            endpoints: &[
                "/albums",
                "/albums/<id>",
                "/favorites",
                "/favorites/<id>",
            ],
            count,
        })
    }

    fn handle_list_albums(&self) -> Response {
        match self.catalog.list() {
            Ok(albums) => Response::json(&AlbumsResponse {
                count: albums.len(),
                items: albums,
            }),

            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn handle_get_album(&self, id: u64) -> Response {
        match self.catalog.get(id) {
            Ok(album) => Response::json(&album),

            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn handle_list_favorites(&self) -> Response {
        match self.favorites.list() {
            Ok(records) => Response::json(&records),

            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn handle_create_favorite(&self, request: &Request) -> Response {
        let draft: FavoriteDraft = match rouille::input::json_input(request) {
            Ok(draft) => draft,
            Err(e) => return ApiError::BadRequest(format!("invalid body: {e}")).into_response(),
        };

        match self.favorites.create(draft) {
            Ok(record) => Response::json(&record).with_status_code(201),

            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn handle_update_favorite(&self, id: u64, request: &Request) -> Response {
        let patch: FavoritePatch = match rouille::input::json_input(request) {
            Ok(patch) => patch,
            Err(e) => return ApiError::BadRequest(format!("invalid body: {e}")).into_response(),
        };

        match self.favorites.update(id, patch) {
            Ok(record) => Response::json(&record),

            Err(e) => ApiError::from(e).into_response(),
        }
    }

    fn handle_delete_favorite(&self, id: u64) -> Response {
        match self.favorites.delete(id) {
            Ok(deleted_id) => Response::json(&DeleteResponse { deleted_id }),

            Err(e) => ApiError::from(e).into_response(),
        }
    }
}

#[derive(Serialize)]
struct IndexResponse<'a> {
    endpoints: &'a [&'a str],
    count: usize,
}

#[derive(Serialize)]
struct AlbumsResponse {
    count: usize,
    items: Vec<crate::domain::album::Album>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    deleted_id: u64,
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}
