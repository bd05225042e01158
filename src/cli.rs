//! Command-line front end over the services layer.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::domain::contact::{ContactStatus, NewContact, UpdateContact};
use crate::domain::list::Sort;
use crate::domain::types::Email;
use crate::domain::user::{NewUser, ThemePreference, UpdateUser};
use crate::dto::ListPageData;
use crate::dto::contacts::ContactsQuery;
use crate::dto::users::UsersQuery;
use crate::repository::HttpRepository;
use crate::services::auth::handle_error;
use crate::services::{ServiceError, ServiceResult, auth, contacts, settings, users};

#[derive(Debug, Parser)]
#[command(name = "crm-admin", version, about = "Administer CRM contacts and users")]
pub struct Cli {
    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a session and keep its token.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show the account behind the current session.
    Whoami,
    #[command(subcommand)]
    Contacts(ContactsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    /// Change the password of the signed-in account.
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Set the preferred theme (light or dark), or switch to the other one
    /// when none is given.
    Theme { theme: Option<ThemePreference> },
}

#[derive(Debug, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,
    /// Field to sort by, as shown in the records (e.g. `createdAt`).
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl PageArgs {
    fn sort(&self) -> Option<Sort> {
        self.sort.as_ref().map(|field| {
            if self.desc {
                Sort::desc(field.as_str())
            } else {
                Sort::asc(field.as_str())
            }
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Pipeline stages to include, comma separated.
        #[arg(long, value_delimiter = ',')]
        estado: Vec<ContactStatus>,
    },
    Show {
        id: String,
    },
    Create(ContactFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ContactChanges,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ContactFields {
    #[arg(long)]
    pub nombres: String,
    #[arg(long)]
    pub apellidos: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub telefono: String,
    #[arg(long)]
    pub nombre_completo: Option<String>,
    #[arg(long, default_value_t = ContactStatus::Prospecto)]
    pub estado: ContactStatus,
    #[arg(long)]
    pub cedula: Option<String>,
    #[arg(long)]
    pub ciudad: Option<String>,
    #[arg(long)]
    pub pais: Option<String>,
    #[arg(long)]
    pub notas: Option<String>,
}

impl TryFrom<ContactFields> for NewContact {
    type Error = ServiceError;

    fn try_from(fields: ContactFields) -> Result<Self, Self::Error> {
        let mut contact = NewContact::new(
            &fields.nombres,
            &fields.apellidos,
            Email::new(fields.email)?,
            &fields.telefono,
        );
        contact.nombre_completo = fields.nombre_completo.unwrap_or_default();
        contact.estado = fields.estado;
        contact.cedula = fields.cedula;
        contact.ciudad = fields.ciudad;
        contact.pais = fields.pais;
        contact.notas = fields.notas;
        Ok(contact)
    }
}

#[derive(Debug, Args)]
pub struct ContactChanges {
    #[arg(long)]
    pub nombres: Option<String>,
    #[arg(long)]
    pub apellidos: Option<String>,
    #[arg(long)]
    pub nombre_completo: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefono: Option<String>,
    #[arg(long)]
    pub estado: Option<ContactStatus>,
    #[arg(long)]
    pub cedula: Option<String>,
    #[arg(long)]
    pub ciudad: Option<String>,
    #[arg(long)]
    pub pais: Option<String>,
    #[arg(long)]
    pub notas: Option<String>,
}

impl TryFrom<ContactChanges> for UpdateContact {
    type Error = ServiceError;

    fn try_from(changes: ContactChanges) -> Result<Self, Self::Error> {
        Ok(UpdateContact {
            nombres: changes.nombres,
            apellidos: changes.apellidos,
            nombre_completo: changes.nombre_completo,
            email: changes.email.map(Email::new).transpose()?,
            telefono: changes.telefono,
            estado: changes.estado,
            cedula: changes.cedula,
            ciudad: changes.ciudad,
            pais: changes.pais,
            notas: changes.notas,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        nombres: String,
        #[arg(long)]
        apellidos: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        superuser: bool,
    },
    Update {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        nombres: Option<String>,
        #[arg(long)]
        apellidos: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        superuser: Option<bool>,
    },
    Delete {
        id: String,
    },
}

/// Runs one command. Authentication failures clear the stored session.
pub async fn run(command: Command, repo: &HttpRepository) -> ServiceResult<()> {
    execute(command, repo)
        .await
        .map_err(|err| handle_error(repo, err))
}

async fn execute(command: Command, repo: &HttpRepository) -> ServiceResult<()> {
    match command {
        Command::Login { email, password } => {
            auth::login(repo, &email, &password).await?;
            let user = auth::identity(repo).await?;
            println!("Logged in as {} <{}>", user.nombre_completo, user.email);
        }
        Command::Logout => {
            auth::logout(repo)?;
            println!("Logged out");
        }
        Command::Whoami => print_json(&auth::identity(repo).await?)?,
        Command::Contacts(command) => run_contacts(command, repo).await?,
        Command::Users(command) => run_users(command, repo).await?,
        Command::Password {
            current,
            new,
            confirm,
        } => {
            settings::change_password(repo, &current, &new, &confirm).await?;
            println!("Password changed");
        }
        Command::Theme { theme } => {
            let theme = match theme {
                Some(theme) => {
                    settings::set_theme(repo, theme).await?;
                    theme
                }
                None => settings::toggle_theme(repo).await?,
            };
            println!("Theme set to {theme}");
        }
    }
    Ok(())
}

async fn run_contacts(command: ContactsCommand, repo: &HttpRepository) -> ServiceResult<()> {
    match command {
        ContactsCommand::List { page, estado } => {
            let query = ContactsQuery {
                page: Some(page.page),
                page_size: Some(page.page_size),
                estado,
                sort: page.sort(),
            };
            let data = contacts::list_contacts(repo, query).await?;
            for contact in &data.items.items {
                println!(
                    "{}  {:<30}  {:<30}  {}",
                    contact.id, contact.nombre_completo, contact.email, contact.estado
                );
            }
            print_navigation(&data);
        }
        ContactsCommand::Show { id } => print_json(&contacts::get_contact(repo, &id).await?)?,
        ContactsCommand::Create(fields) => {
            let contact = contacts::create_contact(repo, fields.try_into()?).await?;
            print_json(&contact)?;
        }
        ContactsCommand::Update { id, fields } => {
            let contact = contacts::update_contact(repo, &id, fields.try_into()?).await?;
            print_json(&contact)?;
        }
        ContactsCommand::Delete { id } => {
            let contact = contacts::delete_contact(repo, &id).await?;
            println!("Deleted {} ({})", contact.nombre_completo, contact.id);
        }
    }
    Ok(())
}

async fn run_users(command: UsersCommand, repo: &HttpRepository) -> ServiceResult<()> {
    match command {
        UsersCommand::List { page } => {
            let query = UsersQuery {
                page: Some(page.page),
                page_size: Some(page.page_size),
                sort: page.sort(),
            };
            let data = users::list_users(repo, query).await?;
            for user in &data.items.items {
                let flags = match (user.is_active, user.is_superuser) {
                    (true, true) => "active, superuser",
                    (true, false) => "active",
                    (false, true) => "inactive, superuser",
                    (false, false) => "inactive",
                };
                println!(
                    "{}  {:<30}  {:<30}  {flags}",
                    user.id, user.nombre_completo, user.email
                );
            }
            print_navigation(&data);
        }
        UsersCommand::Show { id } => print_json(&users::get_user(repo, &id).await?)?,
        UsersCommand::Create {
            email,
            nombres,
            apellidos,
            password,
            superuser,
        } => {
            let mut new_user = NewUser::new(Email::new(email)?, &nombres, &apellidos, password);
            new_user.is_superuser = superuser;
            print_json(&users::create_user(repo, new_user).await?)?;
        }
        UsersCommand::Update {
            id,
            email,
            nombres,
            apellidos,
            password,
            active,
            superuser,
        } => {
            let updates = UpdateUser {
                email: email.map(Email::new).transpose()?,
                nombres,
                apellidos,
                password,
                is_active: active,
                is_superuser: superuser,
                theme_preference: None,
            };
            print_json(&users::update_user(repo, &id, updates).await?)?;
        }
        UsersCommand::Delete { id } => {
            let user = users::delete_user(repo, &id).await?;
            println!("Deleted {} ({})", user.email, user.id);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> ServiceResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ServiceError::Form(format!("cannot render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Renders the page list as `1 2 … [5] 6 … 9`.
pub fn render_pages(pages: &[Option<usize>], current: usize) -> String {
    pages
        .iter()
        .map(|page| match page {
            Some(page) if *page == current => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_navigation<T>(data: &ListPageData<T>) {
    if data.items.pages.is_empty() {
        println!("No records");
    } else {
        println!(
            "{} ({} total)",
            render_pages(&data.items.pages, data.items.page),
            data.total
        );
    }
}
