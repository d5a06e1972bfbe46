mod config;
mod logging;
mod shell;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::AppConfig;
use privata_adapters::{
    present_dashboard, present_gallery_row, present_photo_row, write_export,
    FileIdentityProvider, FsImageResizer, MemoryGalleryRepository, MemoryRatingStore,
    SqliteGalleryRepository, SqliteRatingStore, SqliteStore, SystemClock, UuidIdGenerator,
    WalkdirUploadScanner,
};
use privata_application::{
    ApplicationError, CreateGalleryCommand, DashboardStatsQuery, DeleteGalleryCommand,
    ExportRatingsCommand, GalleryRepository, GalleryService, IdentityProvider,
    ListGalleriesQuery, LoginCommand, LoginOutcome, OpenGalleryCommand, RatePhotoCommand,
    RatingStore, ServicePorts,
};
use privata_domain::{Gallery, GalleryId, PhotoId, Stars};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "privata")]
#[command(about = "Password-gated photo galleries with per-viewer star ratings")]
struct Cli {
    /// Config file (defaults to ./privata.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List galleries
    Galleries,
    /// Show dashboard totals
    Stats {
        #[arg(long)]
        admin_password: String,
    },
    /// Create a gallery from image files or folders
    Create {
        #[arg(long)]
        admin_password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(required = true)]
        uploads: Vec<PathBuf>,
    },
    /// Delete a gallery
    Delete {
        #[arg(long)]
        admin_password: String,
        gallery_id: String,
    },
    /// Show a gallery's photos, optionally narrowed to star buckets
    View {
        gallery_id: String,
        #[arg(long, conflicts_with = "admin_password")]
        password: Option<String>,
        #[arg(long)]
        admin_password: Option<String>,
        /// Rounded star bucket to show; repeat for several
        #[arg(long = "stars")]
        stars: Vec<i64>,
    },
    /// Rate a photo 1-5 stars as this machine's viewer
    Rate {
        gallery_id: String,
        photo_id: String,
        stars: i64,
        #[arg(long)]
        password: String,
    },
    /// Write the ratings report for a gallery
    Export {
        gallery_id: String,
        #[arg(long)]
        admin_password: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive session
    Shell,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::InvalidInput(_)
            | ApplicationError::NotFound(_)
            | ApplicationError::Domain(_) => Self::Usage(error.to_string()),
            other => Self::Runtime(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(1);
        }
    };

    let service = match build_application_service(&config) {
        Ok(service) => service,
        Err(error) => {
            eprintln!("failed to bootstrap privata: {error}");
            return ExitCode::from(1);
        }
    };
    let identity = FileIdentityProvider::new(&config.identity_path);

    match run_command(cli.command, &service, &identity, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> Result<GalleryService, ApplicationError> {
    let (galleries, ratings): (Box<dyn GalleryRepository>, Box<dyn RatingStore>) =
        if config.ephemeral {
            info!("using in-memory storage");
            (
                Box::<MemoryGalleryRepository>::default(),
                Box::<MemoryRatingStore>::default(),
            )
        } else {
            let store = SqliteStore::new(&config.data_path);
            store.initialize()?;
            info!(path = %config.data_path, "storage ready");
            (
                Box::new(SqliteGalleryRepository::new(store.clone())),
                Box::new(SqliteRatingStore::new(store)),
            )
        };

    Ok(GalleryService::new(
        ServicePorts {
            galleries,
            ratings,
            scanner: Box::new(WalkdirUploadScanner),
            resizer: Box::new(FsImageResizer::new(
                &config.cache_dir,
                config.full_size_max,
                config.thumbnail_max,
            )),
            ids: Box::new(UuidIdGenerator),
            clock: Box::new(SystemClock),
        },
        config.admin_password.clone(),
    ))
}

fn run_command(
    command: Command,
    service: &GalleryService,
    identity: &dyn IdentityProvider,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Galleries => {
            let galleries = service.list_galleries(ListGalleriesQuery);
            if galleries.is_empty() {
                println!("no galleries available");
                return Ok(());
            }
            for gallery in galleries {
                println!("{}", present_gallery_row(&gallery));
            }
            Ok(())
        }
        Command::Stats { admin_password } => {
            require_admin(service, admin_password)?;
            println!("{}", present_dashboard(&service.dashboard_stats(DashboardStatsQuery)));
            Ok(())
        }
        Command::Create {
            admin_password,
            name,
            password,
            uploads,
        } => {
            require_admin(service, admin_password)?;
            let gallery = service.create_gallery(CreateGalleryCommand {
                name,
                password,
                uploads,
            })?;
            println!("{}", present_gallery_row(&gallery));
            Ok(())
        }
        Command::Delete {
            admin_password,
            gallery_id,
        } => {
            require_admin(service, admin_password)?;
            let gallery_id = parse_gallery_id(&gallery_id)?;
            service.delete_gallery(DeleteGalleryCommand {
                gallery_id: gallery_id.clone(),
            })?;
            println!("deleted gallery {gallery_id}");
            Ok(())
        }
        Command::View {
            gallery_id,
            password,
            admin_password,
            stars,
        } => {
            let gallery_id = parse_gallery_id(&gallery_id)?;
            let viewer = match (admin_password, password) {
                (Some(admin_password), _) => {
                    require_admin(service, admin_password)?;
                    None
                }
                (None, Some(password)) => {
                    unlock_gallery(service, &gallery_id, password)?;
                    identity.viewer_id().ok()
                }
                (None, None) => {
                    return Err(CommandError::Usage(
                        "either --password or --admin-password is required".to_string(),
                    ))
                }
            };

            let mut session = service.open_gallery(OpenGalleryCommand { gallery_id })?;
            for value in stars {
                let stars =
                    Stars::new(value).map_err(|error| CommandError::Usage(error.to_string()))?;
                session.set_filter(stars, true);
            }
            print!("{}", shell::render_session(&session, viewer.as_ref()));
            Ok(())
        }
        Command::Rate {
            gallery_id,
            photo_id,
            stars,
            password,
        } => {
            let gallery = unlock_gallery(service, &parse_gallery_id(&gallery_id)?, password)?;
            let photo_id =
                PhotoId::new(photo_id).map_err(|error| CommandError::Usage(error.to_string()))?;
            let viewer_id = identity.viewer_id()?;
            let rated = service.rate_photo(RatePhotoCommand {
                gallery_id: gallery.id.clone(),
                photo_id: photo_id.clone(),
                viewer_id: viewer_id.clone(),
                stars,
            })?;
            let position = gallery
                .photos
                .iter()
                .position(|photo| photo.id == photo_id)
                .map(|index| index + 1)
                .unwrap_or_default();
            println!("{}", present_photo_row(position, &rated, Some(&viewer_id)));
            Ok(())
        }
        Command::Export {
            gallery_id,
            admin_password,
            out,
        } => {
            require_admin(service, admin_password)?;
            let artifact = service.export_ratings(ExportRatingsCommand {
                gallery_id: parse_gallery_id(&gallery_id)?,
            })?;
            let dir = out.unwrap_or_else(|| PathBuf::from(&config.export_dir));
            let written = write_export(&dir, &artifact)?;
            println!("exported ratings to {}", written.display());
            Ok(())
        }
        Command::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            shell::run_shell(
                service,
                identity,
                PathBuf::from(&config.export_dir).as_path(),
                stdin.lock(),
                stdout.lock(),
            )
            .map_err(|error| CommandError::Runtime(format!("shell failed: {error}")))
        }
    }
}

fn parse_gallery_id(raw: &str) -> Result<GalleryId, CommandError> {
    GalleryId::new(raw).map_err(|error| CommandError::Usage(error.to_string()))
}

fn require_admin(service: &GalleryService, password: String) -> Result<(), CommandError> {
    match service.login(LoginCommand::Admin { password }) {
        LoginOutcome::Admin => Ok(()),
        LoginOutcome::Rejected { message } => Err(CommandError::Usage(message)),
        LoginOutcome::Viewer { .. } => Err(CommandError::Usage(
            "admin access required".to_string(),
        )),
    }
}

fn unlock_gallery(
    service: &GalleryService,
    gallery_id: &GalleryId,
    password: String,
) -> Result<Gallery, CommandError> {
    match service.login(LoginCommand::Viewer {
        gallery_id: Some(gallery_id.clone()),
        password,
    }) {
        LoginOutcome::Viewer { gallery } => Ok(gallery),
        LoginOutcome::Rejected { message } => Err(CommandError::Usage(message)),
        LoginOutcome::Admin => Err(CommandError::Usage("viewer access required".to_string())),
    }
}
