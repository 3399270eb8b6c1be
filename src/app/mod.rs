// SPDX-License-Identifier: MPL-2.0
//! Application root state and command dispatch.
//!
//! The `App` struct wires the gallery state, the image viewer and the media
//! transfers together and translates commands into those operations. Storage
//! warnings collected along the way are reported after every command; they
//! never abort it.

pub mod cli;
pub mod deep_link;
pub mod paths;
pub mod state_store;

pub use cli::{Command, Flags};
pub use state_store::{LikeState, StateStore};

use crate::config::{self, Config};
use crate::domain::artwork::{parse_tags, Artwork, ArtworkId, NewArtwork};
use crate::domain::comment::CommentThread;
use crate::error::{Error, Result, StorageError};
use crate::media::{self, DownloadOutcome, DownloadRequest, UploadDialog};
use crate::storage::{FileStore, KeyValueStore};
use crate::ui::avatar;
use crate::ui::state::zoom::ZoomFactor;
use crate::ui::viewer::{ImageViewer, ViewerEvent, ViewerOutcome};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

const EMPTY_GALLERY: &str = "The gallery is empty. Upload an artwork to get started.";
const NO_MATCHES: &str = "No Artworks Found. Try a different search term.";

/// Root application state.
pub struct App<S: KeyValueStore> {
    config: Config,
    gallery: StateStore<S>,
    viewer: ImageViewer,
    upload_dialog: UploadDialog,
    /// Comment threads for this session, keyed by artwork.
    comments: HashMap<ArtworkId, CommentThread>,
    pending_warnings: Vec<StorageError>,
}

impl<S: KeyValueStore> App<S> {
    /// Loads the gallery from `store`.
    pub fn new(config: Config, store: S) -> Self {
        let (gallery, pending_warnings) = StateStore::load(store);
        let viewer = ImageViewer::new(ZoomFactor::new(config.viewer.zoom_factor()));
        Self {
            config,
            gallery,
            viewer,
            upload_dialog: UploadDialog::default(),
            comments: HashMap::new(),
            pending_warnings,
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &StateStore<S> {
        &self.gallery
    }

    #[must_use]
    pub fn viewer(&self) -> &ImageViewer {
        &self.viewer
    }

    /// Runs one command, writing its output to `out`.
    ///
    /// `input` feeds the viewer session of [`Command::View`], one event per line.
    pub async fn execute<W, R>(&mut self, command: Command, out: &mut W, input: R) -> Result<()>
    where
        W: Write,
        R: AsyncBufRead + Unpin,
    {
        debug!(?command, "executing command");
        let result = match command {
            Command::Help => {
                write!(out, "{}", cli::HELP)?;
                Ok(())
            }
            Command::List => self.list(out),
            Command::Search { query } => self.search(&query, out),
            Command::Upload {
                file,
                title,
                artist,
                tags,
            } => self.upload(file, title, artist, &tags, out).await,
            Command::Delete { id, force } => self.delete(&ArtworkId::from(id), force, out),
            Command::Like { id } => self.like(&ArtworkId::from(id), out),
            Command::Comment { id, text } => self.comment(ArtworkId::from(id), &text, out),
            Command::Profile { name, avatar, svg } => {
                self.profile(name.as_deref(), avatar.as_deref(), svg, out)
            }
            Command::View { target } => self.view(&target, out, input).await,
            Command::Download { id, dir } => self.download(&ArtworkId::from(id), dir, out).await,
            Command::Share { id, base } => self.share(&ArtworkId::from(id), &base, out),
        };
        self.report_storage_warnings(out)?;
        result
    }

    fn report_storage_warnings<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut warnings = std::mem::take(&mut self.pending_warnings);
        warnings.extend(self.gallery.take_storage_warnings());
        for warning in warnings {
            writeln!(out, "warning: {}", warning)?;
        }
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.gallery.artworks().is_empty() {
            writeln!(out, "{}", EMPTY_GALLERY)?;
            return Ok(());
        }
        for artwork in self.gallery.artworks() {
            self.write_artwork(artwork, out)?;
        }
        Ok(())
    }

    fn search<W: Write>(&self, query: &str, out: &mut W) -> Result<()> {
        if self.gallery.artworks().is_empty() {
            writeln!(out, "{}", EMPTY_GALLERY)?;
            return Ok(());
        }
        let hits = self.gallery.search(query);
        if hits.is_empty() {
            writeln!(out, "{}", NO_MATCHES)?;
        }
        for artwork in hits {
            self.write_artwork(artwork, out)?;
        }
        Ok(())
    }

    fn write_artwork<W: Write>(&self, artwork: &Artwork, out: &mut W) -> Result<()> {
        let artist = if artwork.artist.is_empty() {
            "Unknown Artist"
        } else {
            &artwork.artist
        };
        write!(
            out,
            "{}\t{}\t{}\t{}\t{} likes",
            artwork.id,
            artwork.title,
            artist,
            artwork.tags.join(", "),
            artwork.likes
        )?;
        if self.gallery.is_liked(&artwork.id) {
            write!(out, " (liked)")?;
        }
        if self.gallery.is_owned(&artwork.id) {
            write!(out, " (yours)")?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn upload<W: Write>(
        &mut self,
        file: PathBuf,
        title: String,
        artist: String,
        tags: &str,
        out: &mut W,
    ) -> Result<()> {
        // Reject a missing title before touching the file.
        NewArtwork {
            title: title.clone(),
            image_url: file.display().to_string(),
            ..NewArtwork::default()
        }
        .validate()?;

        self.upload_dialog.open();
        let Some(ticket) = self.upload_dialog.begin() else {
            return Ok(());
        };
        let dialog = &mut self.upload_dialog;
        let read = media::read_image_as_data_url(&file, |percent| {
            dialog.report_progress(ticket, percent);
            debug!(percent, "reading image");
        })
        .await;
        let finished = self.upload_dialog.finish(ticket, read);
        self.upload_dialog.close();

        let Some(read) = finished else {
            return Ok(());
        };
        let image_url = read?;
        let artwork = self.gallery.upload(NewArtwork {
            title,
            artist,
            tags: parse_tags(tags),
            image_url,
        })?;
        writeln!(out, "Uploaded {}\t{}", artwork.id, artwork.title)?;
        Ok(())
    }

    fn delete<W: Write>(&mut self, id: &ArtworkId, force: bool, out: &mut W) -> Result<()> {
        let removed = if force {
            self.gallery.delete(id)
        } else {
            self.gallery.delete_owned(id)?
        };
        if removed {
            self.comments.remove(id);
            writeln!(out, "Deleted {}", id)?;
        } else {
            writeln!(out, "No artwork with id {}", id)?;
        }
        Ok(())
    }

    fn like<W: Write>(&mut self, id: &ArtworkId, out: &mut W) -> Result<()> {
        match self.gallery.toggle_like(id) {
            Some(state) if state.liked => writeln!(out, "Liked {} ({} likes)", id, state.likes)?,
            Some(state) => writeln!(out, "Unliked {} ({} likes)", id, state.likes)?,
            None => writeln!(out, "No artwork with id {}", id)?,
        }
        Ok(())
    }

    fn comment<W: Write>(&mut self, id: ArtworkId, text: &str, out: &mut W) -> Result<()> {
        if self.gallery.artwork(&id).is_none() {
            writeln!(out, "No artwork with id {}", id)?;
            return Ok(());
        }
        let thread = self.comments.entry(id).or_default();
        thread.add(text, self.gallery.profile())?;
        for comment in thread.comments() {
            writeln!(
                out,
                "{}\t{}\t{}",
                comment.timestamp.format("%Y-%m-%d %H:%M"),
                comment.author.display_name,
                comment.text
            )?;
        }
        Ok(())
    }

    fn profile<W: Write>(
        &mut self,
        name: Option<&str>,
        avatar: Option<&str>,
        svg: bool,
        out: &mut W,
    ) -> Result<()> {
        if name.is_some() || avatar.is_some() {
            let current = self.gallery.profile().clone();
            self.gallery.update_profile(
                name.unwrap_or(&current.display_name),
                avatar.unwrap_or(current.avatar.key()),
            )?;
        }
        let profile = self.gallery.profile();
        writeln!(out, "{}\t{}", profile.display_name, profile.avatar)?;
        if svg {
            writeln!(out, "{}", avatar::render(profile.avatar))?;
        }
        Ok(())
    }

    async fn view<W, R>(&mut self, target: &str, out: &mut W, input: R) -> Result<()>
    where
        W: Write,
        R: AsyncBufRead + Unpin,
    {
        let id = if deep_link::parse_fragment(target).is_some() {
            let mut fragment = target.to_string();
            deep_link::consume(&mut fragment, &self.gallery)
        } else {
            let id = ArtworkId::from(target);
            self.gallery.artwork(&id).map(|_| id)
        };
        let Some(id) = id else {
            writeln!(out, "No artwork matches {}", target)?;
            return Ok(());
        };

        self.viewer.open(id);
        self.write_view_state(out)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(event) = ViewerEvent::parse_line(&line) else {
                writeln!(out, "unrecognized event: {}", line.trim())?;
                continue;
            };
            match self.viewer.handle(event) {
                ViewerOutcome::Continue => self.write_view_state(out)?,
                ViewerOutcome::Close | ViewerOutcome::Ignored => break,
            }
        }

        self.viewer.close();
        writeln!(out, "closed")?;
        Ok(())
    }

    fn write_view_state<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(transform) = self.viewer.transform() {
            writeln!(
                out,
                "{}\tcursor={:?}",
                transform.transform().to_css(),
                transform.cursor()
            )?;
        }
        Ok(())
    }

    async fn download<W: Write>(
        &mut self,
        id: &ArtworkId,
        dir: Option<PathBuf>,
        out: &mut W,
    ) -> Result<()> {
        let Some(artwork) = self.gallery.artwork(id) else {
            writeln!(out, "No artwork with id {}", id)?;
            return Ok(());
        };
        let dir = dir.unwrap_or_else(|| self.config.download.resolve_directory());
        match media::download_or_open(DownloadRequest::from(artwork), &dir).await? {
            DownloadOutcome::Saved(path) => writeln!(out, "Saved {}", path.display())?,
            DownloadOutcome::OpenedExternally => {
                writeln!(out, "Opened the image in the default application")?;
            }
        }
        Ok(())
    }

    fn share<W: Write>(&self, id: &ArtworkId, base: &str, out: &mut W) -> Result<()> {
        if self.gallery.artwork(id).is_none() {
            writeln!(out, "No artwork with id {}", id)?;
            return Ok(());
        }
        writeln!(out, "{}", deep_link::share_url(base, id))?;
        Ok(())
    }
}

/// Entry point behind `main`: resolves paths and configuration, opens the
/// on-disk gallery and runs the requested command against stdout/stdin.
pub async fn run(flags: Flags) -> Result<()> {
    let cli_data_dir = flags.data_dir.is_some();
    paths::init_cli_overrides(flags.data_dir, flags.config_dir);

    let (config, config_warning) = config::load();
    crate::logging::init(config.logging.filter.as_deref());
    if let Some(key) = config_warning {
        warn!(key, "settings.toml could not be read, using defaults");
    }

    // `--data-dir` and the environment variable win over the settings file.
    let data_override = if cli_data_dir || std::env::var_os(paths::ENV_DATA_DIR).is_some() {
        None
    } else {
        config.storage.data_dir.clone()
    };
    let store = FileStore::open_default(data_override).ok_or_else(|| {
        Error::Config("no data directory available, pass --data-dir".to_string())
    })?;
    info!(dir = %store.dir().display(), "gallery opened");

    let mut app = App::new(config, store);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.execute(flags.command, &mut out, stdin).await
}
