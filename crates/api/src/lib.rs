pub mod job_schedulers;
pub mod reminder;
mod shared;
mod status;
pub mod subscription;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{DispatcherHandle, ReminderDispatcher};
pub use shared::usecase::{execute, Subscriber, UseCase};
use std::net::TcpListener;
use subtrack_infra::SubtrackContext;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    dispatcher: DispatcherHandle,
}

impl Application {
    pub async fn new(context: SubtrackContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let dispatcher = ReminderDispatcher::new(context).start();

        Ok(Self {
            server,
            port,
            dispatcher,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: SubtrackContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves until the server shuts down, then stops the reminder dispatcher
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.dispatcher.stop();
        res
    }
}
