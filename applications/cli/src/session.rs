//! Runs one parsed command against the directory and writes the result.

use crate::cli::{Commands, CreateArgs, ListArgs, UpdateArgs};
use crate::config::CliConfig;
use crate::render;
use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use std::io::Write;
use tracing::info;
use userdir_client::{FileCapture, PhotoCapture, UserDirClient, UserService};
use userdir_core::{FilterChange, UserDraft, UserId, UserPatch};
use userdir_store::{Command, Directory, Effect, Outcome, UserStore};

pub struct Session {
    directory: Directory<UserDirClient>,
    today: NaiveDate,
}

impl Session {
    pub fn new(config: &CliConfig) -> anyhow::Result<Self> {
        let client = UserDirClient::new(config.client_config())
            .context("Failed to create user directory client")?;
        let store = UserStore::new(client);

        Ok(Self::from_directory(Directory::with_criteria(
            store,
            config.default_criteria(),
        )))
    }

    fn from_directory(directory: Directory<UserDirClient>) -> Self {
        let today = Local::now().date_naive();
        Self {
            directory: directory.with_reference_date(today),
            today,
        }
    }

    /// Compute ages against `today` instead of the local date
    pub fn with_today(self, today: NaiveDate) -> Self {
        Self {
            directory: self.directory.with_reference_date(today),
            today,
        }
    }

    fn client(&self) -> &UserDirClient {
        self.directory.store().service()
    }

    pub async fn execute(&mut self, command: Commands, out: &mut dyn Write) -> anyhow::Result<()> {
        match command {
            Commands::List(args) => self.list(args, out).await,
            Commands::Show { id } => self.show(id, out).await,
            Commands::Facets => {
                self.refresh().await?;
                let facets = self.directory.facets().await;
                writeln!(out, "{}", render::facets(&facets))?;
                Ok(())
            }
            Commands::Create(args) => self.create(args, out).await,
            Commands::Update(args) => self.update(args, out).await,
            Commands::Delete { id } => {
                let outcome = self.directory.dispatch(Command::Delete(id)).await;
                finish(outcome, out)?;
                Ok(())
            }
        }
    }

    async fn refresh(&mut self) -> anyhow::Result<usize> {
        match finish(self.directory.dispatch(Command::Refresh).await, &mut std::io::sink())? {
            Effect::Refreshed { count } => Ok(count),
            _ => Ok(self.directory.store().len().await),
        }
    }

    async fn list(&mut self, args: ListArgs, out: &mut dyn Write) -> anyhow::Result<()> {
        let total = self.refresh().await?;

        for change in filter_changes(args) {
            self.directory.dispatch(Command::SetFilter(change)).await;
        }

        let visible = self.directory.visible_users().await;
        if visible.is_empty() {
            writeln!(out, "No users found")?;
        }
        for user in &visible {
            writeln!(out, "{}", render::user_line(user, self.today))?;
        }
        writeln!(out, "{}", render::summary(visible.len(), total))?;
        Ok(())
    }

    async fn show(&self, id: UserId, out: &mut dyn Write) -> anyhow::Result<()> {
        let user = self.client().get(id).await?;
        let photo = user.photo_url.as_deref().map(|p| self.client().photo_url(p));
        writeln!(
            out,
            "{}",
            render::user_card(&user, self.today, photo.as_deref())
        )?;
        Ok(())
    }

    async fn create(&mut self, args: CreateArgs, out: &mut dyn Write) -> anyhow::Result<()> {
        let mut capture = FileCapture::new(&args.photo);
        let photo = capture.capture().await?;

        let draft = UserDraft {
            name: args.name,
            nickname: args.nickname,
            birth_date: args.birth_date,
            country: args.country,
            province: args.province,
            neighborhood: args.neighborhood,
            email: args.email,
            photo: None,
        }
        .with_photo(photo);

        let outcome = self.directory.dispatch(Command::Create(draft)).await;
        if let Effect::Created(user) = finish(outcome, out)? {
            info!(user_id = ?user.id, "Created user from CLI");
            self.write_card(&user, out)?;
        }
        Ok(())
    }

    async fn update(&mut self, args: UpdateArgs, out: &mut dyn Write) -> anyhow::Result<()> {
        let photo = match &args.photo {
            Some(path) => Some(FileCapture::new(path).capture().await?),
            None => None,
        };

        let patch = UserPatch {
            name: args.name,
            nickname: args.nickname,
            birth_date: args.birth_date,
            country: args.country,
            province: args.province,
            neighborhood: args.neighborhood,
            email: args.email,
            photo,
        };

        let outcome = self
            .directory
            .dispatch(Command::Update {
                id: args.id,
                patch,
            })
            .await;
        if let Effect::Updated(user) = finish(outcome, out)? {
            self.write_card(&user, out)?;
        }
        Ok(())
    }

    fn write_card(&self, user: &userdir_core::User, out: &mut dyn Write) -> anyhow::Result<()> {
        let photo = user.photo_url.as_deref().map(|p| self.client().photo_url(p));
        writeln!(
            out,
            "{}",
            render::user_card(user, self.today, photo.as_deref())
        )?;
        Ok(())
    }
}

/// Write the success notice, or turn a failed outcome into an error carrying its notice
fn finish(outcome: Outcome, out: &mut dyn Write) -> anyhow::Result<Effect> {
    match &outcome.notice {
        Some(notice) if notice.is_error() => bail!("{}", notice.message),
        Some(notice) => writeln!(out, "{notice}")?,
        None => {}
    }
    Ok(outcome.effect?)
}

fn filter_changes(args: ListArgs) -> Vec<FilterChange> {
    let mut changes = Vec::new();
    if let Some(term) = args.search {
        changes.push(FilterChange::SearchTerm(term));
    }
    if let Some(country) = args.country {
        changes.push(FilterChange::Country(country));
    }
    if let Some(province) = args.province {
        changes.push(FilterChange::Province(province));
    }
    if let Some(min) = args.min_age {
        changes.push(FilterChange::MinAge(min));
    }
    if let Some(max) = args.max_age {
        changes.push(FilterChange::MaxAge(max));
    }
    changes
}
