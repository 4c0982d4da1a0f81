use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::auth::identity::PgIdentityProvider;
use crate::auth::Capability;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};

#[derive(Parser, Debug)]
#[command(
    name = "applicants-api",
    about = "Applicant tracking API with capability-gated access",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run migrations and start the HTTP server (default command)
    Serve(ServeArgs),
    /// Seed the fixture users and print an API token for each
    CreateTestUsers,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub port: Option<u16>,
}

/// Fixture users: one holding every capability, then one per capability.
fn test_users() -> Vec<(&'static str, Vec<Capability>)> {
    let mut users = vec![("allperms", Capability::ALL.to_vec())];
    users.extend(
        Capability::ALL
            .into_iter()
            .map(|capability| (fixture_username(capability), vec![capability])),
    );
    users
}

fn fixture_username(capability: Capability) -> &'static str {
    match capability {
        Capability::ViewApplicant => "viewapplicant",
        Capability::CreateApplicant => "createapplicant",
        Capability::UpdateApplicant => "updateapplicant",
        Capability::DeleteApplicant => "deleteapplicant",
        Capability::ViewNote => "viewnote",
        Capability::CreateNote => "createnote",
    }
}

pub async fn create_test_users(config: &Config) -> Result<()> {
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    let identities = PgIdentityProvider::new(pool);

    for (index, (username, capabilities)) in test_users().into_iter().enumerate() {
        let email = format!("user{index}@test.com");
        let token = identities.seed_user(username, &email, &capabilities).await?;
        println!("{username}\t{token}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_users_hold_their_own_capability() {
        let users = test_users();
        assert_eq!(users.len(), 7);
        assert_eq!(users[0].1.len(), Capability::ALL.len());
        for (username, capabilities) in &users[1..] {
            assert_eq!(capabilities.len(), 1);
            assert_eq!(username.replace('_', ""), capabilities[0].as_str().replace('_', ""));
        }
    }

    #[test]
    fn test_serve_is_parsed_with_port() {
        let cli = Cli::parse_from(["applicants-api", "serve", "--port", "9000"]);
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(9000)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::parse_from(["applicants-api"]).command.is_none());
    }
}
