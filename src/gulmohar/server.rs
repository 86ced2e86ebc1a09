use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use navgenius::models::DataEnvelope;
use navgenius::render::BaseMap;
use navgenius::{
    DataLoadError, DatasetStore, DepotLocation, Palette, RouteViewer, Selection, VehicleClass,
    View, ViewMode,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::OnceLock;
use tracing::{error, info};

pub struct AppState {
    store: DatasetStore,
    base: BaseMap,
    viewer: OnceLock<RouteViewer>,
}

impl AppState {
    pub fn new(store: DatasetStore, base: BaseMap) -> Self {
        Self {
            store,
            base,
            viewer: OnceLock::new(),
        }
    }

    // Loading is deferred to the first request so a missing dataset is
    // reported to that request instead of stopping the server.
    fn viewer(&self) -> Result<&RouteViewer, DataLoadError> {
        if let Some(viewer) = self.viewer.get() {
            return Ok(viewer);
        }

        let data = self.store.load()?;
        Ok(self
            .viewer
            .get_or_init(|| RouteViewer::new(data, Palette::default(), self.base.clone())))
    }
}

#[derive(Deserialize, Debug)]
pub struct RouteQuery {
    pub mode: Option<String>,
    pub depot: Option<String>,
    pub vehicle: Option<String>,
}

impl RouteQuery {
    /// Absent selectors fall back to the selector defaults.
    fn selection(&self) -> Result<Selection, navgenius::SelectionError> {
        let defaults = Selection::default();
        Ok(Selection {
            mode: self
                .mode
                .as_deref()
                .map(str::parse::<ViewMode>)
                .transpose()?
                .unwrap_or(defaults.mode),
            depot: self
                .depot
                .as_deref()
                .map(str::parse::<DepotLocation>)
                .transpose()?
                .unwrap_or(defaults.depot),
            vehicle: self
                .vehicle
                .as_deref()
                .map(str::parse::<VehicleClass>)
                .transpose()?
                .unwrap_or(defaults.vehicle),
        })
    }
}

fn load_error(err: &DataLoadError) -> HttpResponse {
    error!("Error loading data: {}", err);
    HttpResponse::InternalServerError().json(json!({ "status": format!("Error loading data: {}", err) }))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "status": message }))
}

fn selected(viewer: &RouteViewer, selection: &Selection) -> HttpResponse {
    match viewer.select(selection) {
        Ok(View::Route(route_view)) => HttpResponse::Ok().json(&*route_view),
        Ok(view) => HttpResponse::Ok().json(view.deck()),
        Err(err) => HttpResponse::NotFound().json(json!({ "status": err.to_string() })),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(overview)
        .service(network)
        .service(route)
        .service(get_data);
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("Gulmohar Route Viewer")
}

#[get("/views/overview")]
async fn overview(state: web::Data<AppState>) -> impl Responder {
    match state.viewer() {
        Ok(viewer) => HttpResponse::Ok().json(&*viewer.overview()),
        Err(err) => load_error(&err),
    }
}

#[get("/views/network")]
async fn network(state: web::Data<AppState>) -> impl Responder {
    let selection = Selection {
        mode: ViewMode::FullNetwork,
        ..Selection::default()
    };

    match state.viewer() {
        Ok(viewer) => selected(viewer, &selection),
        Err(err) => load_error(&err),
    }
}

#[get("/views/route")]
async fn route(state: web::Data<AppState>, query: web::Query<RouteQuery>) -> impl Responder {
    let selection = match query.selection() {
        Ok(selection) => selection,
        Err(err) => return bad_request(err.to_string()),
    };

    match state.viewer() {
        Ok(viewer) => selected(viewer, &selection),
        Err(err) => load_error(&err),
    }
}

/// The three datasets as one envelope, records orient.
///
/// Rows are re-encoded from the loaded datasets, so `srcdf` carries the
/// resolved `id`, `name` and `icon_data` and unknown columns are dropped.
#[get("/get-data")]
async fn get_data(state: web::Data<AppState>) -> impl Responder {
    match state.store.load() {
        Ok(data) => HttpResponse::Ok().json(DataEnvelope::from(&*data)),
        Err(err) => load_error(&err),
    }
}

pub async fn run(state: AppState, address: String, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);
    info!("Starting route viewer on {}:{}", address, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(config)
    })
    .bind((address, port))?
    .run()
    .await
}
