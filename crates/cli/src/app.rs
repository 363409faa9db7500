//! Command dispatch.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use voyage_client::services::{
    AuthService, DashboardService, DestinationService, HotelService, OrderService, PackService,
    ProfileService, ReservationService,
};
use voyage_client::{admin_guard, ApiClient, ClientConfig, LocalFile, ScopedSession, SessionKey};
use voyage_client::{SessionScope, SessionStore};
use voyage_core::models::DestinationSearch;
use voyage_core::route::parse_route_id;
use voyage_editor::{PreviewRegistry, ProfileEditor};

use crate::cli::{
    Command, DestinationsCommand, ImageCommand, ProfileCommand, ReservationsCommand,
    ResourceCommand, UploadCommand,
};
use crate::{edit, output};

pub struct App {
    api: ApiClient,
    session: Arc<ScopedSession>,
    previews: PreviewRegistry,
}

impl App {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let session = Arc::new(
            ScopedSession::open(config.session_file.clone()).with_context(|| {
                format!("Failed to open session file {}", config.session_file.display())
            })?,
        );
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self {
            api,
            session,
            previews: PreviewRegistry::new(),
        })
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<()> {
        if command.requires_admin() {
            admin_guard(self.session.as_ref())?;
        }
        match command {
            Command::Login {
                email,
                password,
                remember,
            } => self.login(&email, &password, remember).await,
            Command::Logout => {
                AuthService::new(self.api.clone()).logout()?;
                println!("Signed out.");
                Ok(())
            }
            Command::ForgotPassword { email } => {
                let reply = AuthService::new(self.api.clone())
                    .forgot_password(&email)
                    .await?;
                println!("{reply}");
                Ok(())
            }
            Command::ResetPassword { token, password } => {
                let reply = AuthService::new(self.api.clone())
                    .reset_password(&token, &password)
                    .await?;
                println!("{reply}");
                Ok(())
            }
            Command::Whoami => self.whoami(),
            Command::Dashboard => {
                let data = DashboardService::new(self.api.clone()).get().await?;
                output::json(&data)
            }
            Command::Orders {
                order_type,
                page,
                size,
            } => {
                let page = OrderService::new(self.api.clone())
                    .page(order_type, page, size)
                    .await?;
                output::orders(&page);
                Ok(())
            }
            Command::Hotels(cmd) => self.hotels(cmd).await,
            Command::Destinations(cmd) => self.destinations(cmd).await,
            Command::Packs(cmd) => self.packs(cmd).await,
            Command::Reservations(cmd) => self.reservations(cmd).await,
            Command::HotelImage(ImageCommand::Delete { id, index }) => {
                let mut editor = edit::open(
                    HotelService::new(self.api.clone()),
                    self.previews.clone(),
                    Some(id.as_str()),
                )
                .await?;
                let hotel = editor.delete_image(index).await?;
                println!("Hotel {id} now has {} image(s).", hotel.images.len());
                Ok(())
            }
            Command::DestinationImage(ImageCommand::Delete { id, index }) => {
                let mut editor = edit::open(
                    DestinationService::new(self.api.clone()),
                    self.previews.clone(),
                    Some(id.as_str()),
                )
                .await?;
                let destination = editor.delete_image(index).await?;
                println!(
                    "Destination {id} now has {} image(s).",
                    destination.images.len()
                );
                Ok(())
            }
            Command::DestinationImages(UploadCommand::Upload { id, files }) => {
                let id = parse_route_id("destination", Some(id.as_str()))?;
                let files = read_files(&files).await?;
                let destination = DestinationService::new(self.api.clone())
                    .upload_images(id, &files)
                    .await?;
                println!(
                    "Destination {id} now has {} image(s).",
                    destination.images.len()
                );
                Ok(())
            }
            Command::Profile(cmd) => self.profile(cmd).await,
            Command::Hotel(cmd) => {
                let (id, args) = cmd.into_parts();
                edit::hotel(&self.api, &self.previews, id.as_deref(), args).await
            }
            Command::Destination(cmd) => {
                let (id, args) = cmd.into_parts();
                edit::destination(&self.api, &self.previews, id.as_deref(), args).await
            }
            Command::Pack(cmd) => {
                let (id, args) = cmd.into_parts();
                edit::pack(&self.api, &self.previews, id.as_deref(), args).await
            }
        }
    }

    async fn login(&self, email: &str, password: &str, remember: bool) -> anyhow::Result<()> {
        let login = AuthService::new(self.api.clone())
            .login(email, password, remember)
            .await?;
        println!("Signed in as {} <{}>.", login.name, login.email);
        if !remember {
            println!("The session lasts for this command only; pass --remember to keep it.");
        }
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let session = self.session.as_ref();
        let field = |key: SessionKey| session.get(key).unwrap_or_default();
        println!("{} <{}>", field(SessionKey::Name), field(SessionKey::Email));
        println!("role: {}", field(SessionKey::Role));
        let image = field(SessionKey::ImageUrl);
        if !image.is_empty() {
            println!("image: {image}");
        }
        let kept = match session.active_scope() {
            SessionScope::Persistent => "remembered",
            SessionScope::SessionOnly => "this command only",
        };
        println!("session: {kept}");
        Ok(())
    }

    async fn hotels(&self, cmd: ResourceCommand) -> anyhow::Result<()> {
        let service = HotelService::new(self.api.clone());
        match cmd {
            ResourceCommand::List => output::hotels(&service.list().await?),
            ResourceCommand::Show { id } => {
                output::json(&service.get(parse_route_id("hotel", Some(id.as_str()))?).await?)?
            }
            ResourceCommand::Delete { id } => {
                let id = parse_route_id("hotel", Some(id.as_str()))?;
                service.delete(id).await?;
                println!("Deleted hotel {id}.");
            }
        }
        Ok(())
    }

    async fn destinations(&self, cmd: DestinationsCommand) -> anyhow::Result<()> {
        let service = DestinationService::new(self.api.clone());
        match cmd {
            DestinationsCommand::List => output::destinations(&service.list().await?),
            DestinationsCommand::Show { id } => output::json(
                &service
                    .get(parse_route_id("destination", Some(id.as_str()))?)
                    .await?,
            )?,
            DestinationsCommand::Delete { id } => {
                let id = parse_route_id("destination", Some(id.as_str()))?;
                service.delete(id).await?;
                println!("Deleted destination {id}.");
            }
            DestinationsCommand::Search {
                q,
                max_price,
                check_in,
                check_out,
            } => {
                let filters = DestinationSearch {
                    q,
                    max_price,
                    check_in,
                    check_out,
                };
                output::destinations(&service.search(&filters).await?);
            }
        }
        Ok(())
    }

    async fn packs(&self, cmd: ResourceCommand) -> anyhow::Result<()> {
        let service = PackService::new(self.api.clone());
        match cmd {
            ResourceCommand::List => output::packs(&service.list().await?),
            ResourceCommand::Show { id } => {
                output::json(&service.get(parse_route_id("pack", Some(id.as_str()))?).await?)?
            }
            ResourceCommand::Delete { id } => {
                let id = parse_route_id("pack", Some(id.as_str()))?;
                service.delete(id).await?;
                println!("Deleted pack {id}.");
            }
        }
        Ok(())
    }

    async fn reservations(&self, cmd: ReservationsCommand) -> anyhow::Result<()> {
        let service = ReservationService::new(self.api.clone());
        match cmd {
            ReservationsCommand::List => output::reservations(&service.list().await?),
            ReservationsCommand::Show { id } => output::json(
                &service
                    .get(parse_route_id("reservation", Some(id.as_str()))?)
                    .await?,
            )?,
            ReservationsCommand::Invoice { id, pdf } => {
                let id = parse_route_id("reservation", Some(id.as_str()))?;
                match pdf {
                    Some(path) => {
                        let bytes = service.invoice_pdf(id).await?;
                        tokio::fs::write(&path, &bytes)
                            .await
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Saved invoice to {} ({} bytes).", path.display(), bytes.len());
                    }
                    None => output::json(&service.invoice_json(id).await?)?,
                }
            }
        }
        Ok(())
    }

    async fn profile(&self, cmd: ProfileCommand) -> anyhow::Result<()> {
        match cmd {
            ProfileCommand::Show => {
                output::json(&ProfileService::new(self.api.clone()).get().await?)
            }
            ProfileCommand::Image { file } => {
                let file = read_file(&file).await?;
                let mut editor =
                    ProfileEditor::load(ProfileService::new(self.api.clone()), self.previews.clone())
                        .await?;
                editor.select_image(file);
                let profile = editor.save().await?;
                println!(
                    "Profile image is now {}.",
                    profile.image_url.as_deref().unwrap_or_default()
                );
                Ok(())
            }
        }
    }
}

pub async fn read_file(path: &Path) -> anyhow::Result<LocalFile> {
    LocalFile::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn read_files(paths: &[impl AsRef<Path>]) -> anyhow::Result<Vec<LocalFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_file(path.as_ref()).await?);
    }
    Ok(files)
}
