//! Seed an administrator account: `create_admin <email> <name> <password>`.

use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;

use vitrina::db::establish_connection_pool;
use vitrina::domain::user::NewUser;
use vitrina::repository::{DieselRepository, UserWriter};
use vitrina::services::auth::hash_password;

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let mut args = env::args().skip(1);
    let (Some(email), Some(name), Some(password)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: create_admin <email> <name> <password>");
        return ExitCode::FAILURE;
    };

    let database_url = env::var("DATABASE_URL").unwrap_or("vitrina.db".to_string());
    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };
    let repo = DieselRepository::new(pool);

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Failed to hash the password: {e}");
            return ExitCode::FAILURE;
        }
    };

    match repo.create_user(&NewUser::new(email, name, password_hash)) {
        Ok(user) => {
            log::info!("Created administrator {} (id {})", user.email, user.id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to create the administrator: {e}");
            ExitCode::FAILURE
        }
    }
}
