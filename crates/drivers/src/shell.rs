use std::io::{self, BufRead, Write};
use std::path::Path;

use privata_adapters::{
    present_dashboard, present_filters, present_gallery_heading, present_gallery_row,
    present_photo_row, write_export,
};
use privata_application::{
    DashboardStatsQuery, ExportRatingsCommand, GalleryService, GallerySession, IdentityProvider,
    ListGalleriesQuery, LoginCommand, LoginOutcome, OpenGalleryCommand, RatePhotoCommand,
    SessionController, View,
};
use privata_domain::{GalleryId, PhotoId, Stars, ViewerId};

const HELP: &str = "\
commands:
  login admin <password>
  login gallery <gallery_id> <password>
  galleries
  stats
  open <gallery_id>
  show
  filter <1-5>
  clear
  rate <photo_id> <1-5>
  export
  back
  logout
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    LoginAdmin { password: String },
    LoginGallery { gallery_id: String, password: String },
    Galleries,
    Stats,
    Open { gallery_id: String },
    Show,
    Filter { stars: i64 },
    Clear,
    Rate { photo_id: String, stars: i64 },
    Export,
    Back,
    Logout,
    Help,
    Quit,
}

/// Blank lines parse to `None`.
pub fn parse_shell_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return Ok(None),
        ["login", "admin", password] => ShellCommand::LoginAdmin {
            password: password.to_string(),
        },
        ["login", "gallery", gallery_id, password] => ShellCommand::LoginGallery {
            gallery_id: gallery_id.to_string(),
            password: password.to_string(),
        },
        ["login", ..] => {
            return Err(
                "usage: login admin <password> | login gallery <id> <password>".to_string(),
            )
        }
        ["galleries"] => ShellCommand::Galleries,
        ["stats"] => ShellCommand::Stats,
        ["open", gallery_id] => ShellCommand::Open {
            gallery_id: gallery_id.to_string(),
        },
        ["show"] => ShellCommand::Show,
        ["filter", stars] => ShellCommand::Filter {
            stars: parse_stars(stars)?,
        },
        ["clear"] => ShellCommand::Clear,
        ["rate", photo_id, stars] => ShellCommand::Rate {
            photo_id: photo_id.to_string(),
            stars: parse_stars(stars)?,
        },
        ["export"] => ShellCommand::Export,
        ["back"] => ShellCommand::Back,
        ["logout"] => ShellCommand::Logout,
        ["help"] => ShellCommand::Help,
        ["quit"] | ["exit"] => ShellCommand::Quit,
        [other, ..] => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

fn parse_stars(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("invalid star value: {raw}"))
}

/// Heading, filter toggles and the visible photos, numbered by their place
/// in the whole gallery.
pub fn render_session(session: &GallerySession, viewer: Option<&ViewerId>) -> String {
    let mut out = format!(
        "{}\n{}\n",
        present_gallery_heading(session),
        present_filters(&session.filters())
    );
    let visible = session.visible();
    if visible.is_empty() {
        out.push_str("no photos match the selected ratings\n");
        return out;
    }
    for rated in &visible {
        let position = session
            .photos()
            .iter()
            .position(|photo| photo.photo.id == rated.photo.id)
            .map(|index| index + 1)
            .unwrap_or_default();
        out.push_str(&present_photo_row(position, rated, viewer));
        out.push('\n');
    }
    out
}

struct Shell<'a> {
    service: &'a GalleryService,
    identity: &'a dyn IdentityProvider,
    export_dir: &'a Path,
    session: SessionController,
    gallery: Option<GallerySession>,
}

impl Shell<'_> {
    fn prompt(&self) -> &'static str {
        match self.session.view() {
            View::Login => "login> ",
            View::Admin => "admin> ",
            View::Gallery => "gallery> ",
        }
    }

    fn viewer(&self) -> Option<ViewerId> {
        self.identity.viewer_id().ok()
    }

    fn handle(&mut self, command: ShellCommand) -> Result<String, String> {
        match command {
            ShellCommand::LoginAdmin { password } => {
                let outcome = self.service.login(LoginCommand::Admin { password });
                self.apply_login(outcome)
            }
            ShellCommand::LoginGallery {
                gallery_id,
                password,
            } => {
                let outcome = self.service.login(LoginCommand::Viewer {
                    gallery_id: GalleryId::new(gallery_id).ok(),
                    password,
                });
                self.apply_login(outcome)
            }
            ShellCommand::Galleries => {
                let rows: Vec<String> = self
                    .service
                    .list_galleries(ListGalleriesQuery)
                    .iter()
                    .map(present_gallery_row)
                    .collect();
                if rows.is_empty() {
                    Ok("no galleries available".to_string())
                } else {
                    Ok(rows.join("\n"))
                }
            }
            ShellCommand::Stats => {
                self.require_admin()?;
                Ok(present_dashboard(
                    &self.service.dashboard_stats(DashboardStatsQuery),
                ))
            }
            ShellCommand::Open { gallery_id } => {
                let gallery_id = GalleryId::new(gallery_id).map_err(|error| error.to_string())?;
                let gallery = self.load(gallery_id.clone())?;
                self.session
                    .view_gallery(gallery_id)
                    .map_err(|error| error.to_string())?;
                Ok(self.enter(gallery))
            }
            ShellCommand::Show => {
                let gallery = self.current_gallery()?;
                Ok(render_session(gallery, self.viewer().as_ref()))
            }
            ShellCommand::Filter { stars } => {
                let stars = Stars::new(stars).map_err(|error| error.to_string())?;
                let viewer = self.viewer();
                let gallery = self.current_gallery_mut()?;
                gallery.toggle_filter(stars);
                Ok(render_session(gallery, viewer.as_ref()))
            }
            ShellCommand::Clear => {
                let viewer = self.viewer();
                let gallery = self.current_gallery_mut()?;
                gallery.clear_filters();
                Ok(render_session(gallery, viewer.as_ref()))
            }
            ShellCommand::Rate { photo_id, stars } => {
                let viewer_id = self.identity.viewer_id().map_err(|error| error.to_string())?;
                let photo_id = PhotoId::new(photo_id).map_err(|error| error.to_string())?;
                let service = self.service;
                let gallery = self.current_gallery_mut()?;
                let rated = service
                    .rate_photo(RatePhotoCommand {
                        gallery_id: gallery.gallery_id().clone(),
                        photo_id: photo_id.clone(),
                        viewer_id: viewer_id.clone(),
                        stars,
                    })
                    .map_err(|error| error.to_string())?;
                gallery.replace(rated.clone());
                let position = gallery
                    .photos()
                    .iter()
                    .position(|photo| photo.photo.id == photo_id)
                    .map(|index| index + 1)
                    .unwrap_or_default();
                Ok(present_photo_row(position, &rated, Some(&viewer_id)))
            }
            ShellCommand::Export => {
                self.require_admin()?;
                let gallery_id = self.current_gallery()?.gallery_id().clone();
                let artifact = self
                    .service
                    .export_ratings(ExportRatingsCommand { gallery_id })
                    .map_err(|error| error.to_string())?;
                let written =
                    write_export(self.export_dir, &artifact).map_err(|error| error.to_string())?;
                Ok(format!("exported ratings to {}", written.display()))
            }
            ShellCommand::Back => {
                self.session.back();
                if self.session.view() != View::Gallery {
                    self.gallery = None;
                }
                Ok(self.describe_view())
            }
            ShellCommand::Logout => {
                self.session.logout();
                self.gallery = None;
                Ok(self.describe_view())
            }
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    fn apply_login(&mut self, outcome: LoginOutcome) -> Result<String, String> {
        if let Some(message) = self.session.handle_login(&outcome) {
            return Err(message);
        }
        match outcome {
            LoginOutcome::Viewer { gallery } => {
                let gallery = self.load(gallery.id)?;
                Ok(self.enter(gallery))
            }
            _ => {
                self.gallery = None;
                Ok(format!(
                    "admin dashboard\n{}",
                    present_dashboard(&self.service.dashboard_stats(DashboardStatsQuery))
                ))
            }
        }
    }

    fn load(&self, gallery_id: GalleryId) -> Result<GallerySession, String> {
        self.service
            .open_gallery(OpenGalleryCommand { gallery_id })
            .map_err(|error| error.to_string())
    }

    fn enter(&mut self, gallery: GallerySession) -> String {
        let rendered = render_session(&gallery, self.viewer().as_ref());
        self.gallery = Some(gallery);
        rendered
    }

    fn require_admin(&self) -> Result<(), String> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err("admin access required".to_string())
        }
    }

    fn current_gallery(&self) -> Result<&GallerySession, String> {
        self.gallery
            .as_ref()
            .filter(|_| self.session.view() == View::Gallery)
            .ok_or_else(|| "no gallery is open".to_string())
    }

    fn current_gallery_mut(&mut self) -> Result<&mut GallerySession, String> {
        if self.session.view() != View::Gallery {
            return Err("no gallery is open".to_string());
        }
        self.gallery
            .as_mut()
            .ok_or_else(|| "no gallery is open".to_string())
    }

    fn describe_view(&self) -> String {
        match self.session.view() {
            View::Login => "logged out".to_string(),
            View::Admin => "admin dashboard".to_string(),
            View::Gallery => "gallery".to_string(),
        }
    }
}

pub fn run_shell<R: BufRead, W: Write>(
    service: &GalleryService,
    identity: &dyn IdentityProvider,
    export_dir: &Path,
    input: R,
    mut output: W,
) -> io::Result<()> {
    let mut shell = Shell {
        service,
        identity,
        export_dir,
        session: SessionController::new(),
        gallery: None,
    };

    write!(output, "{}", shell.prompt())?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        match parse_shell_command(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => match shell.handle(command) {
                Ok(message) => writeln!(output, "{}", message.trim_end())?,
                Err(message) => writeln!(output, "error: {message}")?,
            },
            Err(message) => writeln!(output, "error: {message}")?,
        }
        write!(output, "{}", shell.prompt())?;
        output.flush()?;
    }
    Ok(())
}
