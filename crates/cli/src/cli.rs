//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use voyage_client::services::orders::DEFAULT_PAGE_SIZE;
use voyage_core::models::OrderType;
use voyage_core::types::Date;

#[derive(Debug, Parser)]
#[command(name = "voyage-admin")]
#[command(about = "Administer hotels, destinations, packs and reservations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in as an administrator
    Login {
        email: String,
        password: String,
        /// Keep the session on disk for later invocations
        #[arg(long)]
        remember: bool,
    },
    /// Clear the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Show dashboard figures
    Dashboard,
    /// Page through recent orders
    Orders {
        /// ALL, HOTEL, DESTINATION or PACK
        #[arg(long = "type", default_value = "ALL")]
        order_type: OrderType,
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Browse hotels
    #[command(subcommand)]
    Hotels(ResourceCommand),
    /// Browse and search destinations
    #[command(subcommand)]
    Destinations(DestinationsCommand),
    /// Browse packs
    #[command(subcommand)]
    Packs(ResourceCommand),
    /// Browse hotel reservations and fetch invoices
    #[command(subcommand)]
    Reservations(ReservationsCommand),
    /// Manage a hotel's gallery
    #[command(subcommand)]
    HotelImage(ImageCommand),
    /// Manage a destination's gallery
    #[command(subcommand)]
    DestinationImage(ImageCommand),
    /// Add images to a destination's gallery
    #[command(subcommand)]
    DestinationImages(UploadCommand),
    /// Show or update the admin profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Create or update a hotel from a JSON draft
    #[command(subcommand)]
    Hotel(HotelCommand),
    /// Create or update a destination from a JSON draft
    #[command(subcommand)]
    Destination(DestinationCommand),
    /// Create or update a pack from a JSON draft
    #[command(subcommand)]
    Pack(PackCommand),
    /// Set a new password using a reset token
    ResetPassword { token: String, password: String },
    /// Request a password reset email
    ForgotPassword { email: String },
}

impl Command {
    /// Everything except signing in and out and password recovery needs
    /// an admin session.
    pub fn requires_admin(&self) -> bool {
        !matches!(
            self,
            Self::Login { .. } | Self::Logout | Self::ForgotPassword { .. } | Self::ResetPassword { .. }
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    List,
    Show { id: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum DestinationsCommand {
    List,
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Search with any combination of filters
    Search {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        max_price: Option<f64>,
        /// YYYY-MM-DD
        #[arg(long)]
        check_in: Option<Date>,
        /// YYYY-MM-DD
        #[arg(long)]
        check_out: Option<Date>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    List,
    Show {
        id: String,
    },
    /// Print the invoice, or save it as PDF
    Invoice {
        id: String,
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    /// Delete the gallery image at a zero-based position
    Delete { id: String, index: usize },
}

#[derive(Debug, Subcommand)]
pub enum UploadCommand {
    Upload {
        id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Replace the profile image
    Image { file: PathBuf },
}

/// `create` and `update` subcommands around an argument set.
macro_rules! edit_command {
    ($name:ident, $args:ty) => {
        #[derive(Debug, Subcommand)]
        pub enum $name {
            Create {
                #[command(flatten)]
                args: $args,
            },
            Update {
                id: String,
                #[command(flatten)]
                args: $args,
            },
        }

        impl $name {
            /// Raw id for updates, `None` for creates.
            pub fn into_parts(self) -> (Option<String>, $args) {
                match self {
                    Self::Create { args } => (None, args),
                    Self::Update { id, args } => (Some(id), args),
                }
            }
        }
    };
}

edit_command!(HotelCommand, HotelArgs);
edit_command!(DestinationCommand, DestinationArgs);
edit_command!(PackCommand, PackArgs);

#[derive(Debug, Args)]
pub struct HotelArgs {
    /// JSON file holding the hotel draft
    pub draft: PathBuf,
    /// Cover image
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Room image as <room index>=<file>; repeatable
    #[arg(long = "room-image", value_parser = parse_indexed_file)]
    pub room_images: Vec<(usize, PathBuf)>,
}

#[derive(Debug, Args)]
pub struct DestinationArgs {
    /// JSON file holding the destination draft
    pub draft: PathBuf,
    /// Gallery image; repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PackArgs {
    /// JSON file holding the pack draft
    pub draft: PathBuf,
}

/// Parse `<index>=<path>`.
pub fn parse_indexed_file(raw: &str) -> Result<(usize, PathBuf), String> {
    let (index, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <index>=<file>, got '{raw}'"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("'{index}' is not a room index"))?;
    if path.trim().is_empty() {
        return Err(format!("missing file for room {index}"));
    }
    Ok((index, PathBuf::from(path)))
}
