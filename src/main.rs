use anyhow::Result;
use clap::Parser;
use log::*;
use service::{config::Config, logging::Logger};
use std::process::ExitCode;
use std::sync::Arc;

use domain::error::{AuthErrorKind, DomainErrorKind, Error as DomainError};
use domain::messages::*;
use domain::{auth, tag, todo, todos, ApiResult, TodoApiClient};
use todo_auth::session::{FileStorage, TokenStore};

mod cli;
mod output;

use cli::{Cli, Command, TagCommand, TodoCommand};

/// Exit status when the user has to log in again.
const EXIT_LOGIN_REQUIRED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    Config::load_env_file();
    let cli = Cli::parse();

    if let Err(err) = Logger::init_logger(&cli.config) {
        eprintln!("Failed to initialize logger: {err}");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:?}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let session_file = cli.config.session_file();
    debug!("Using session file {}", session_file.display());

    let store = TokenStore::open(Arc::new(FileStorage::new(session_file))).await?;
    let api = TodoApiClient::new(&cli.config, store)?;
    let json = cli.json;

    let code = match cli.command {
        Command::Login { email, password } => {
            let result = ApiResult::from_result(
                auth::login(&api, &email, &password).await,
                LOGIN_FAILED,
            );
            output::report(&result, json, |user| match user {
                Some(user) => output::print_success(&format!("Logged in as {}", user.display_name())),
                None => output::print_success("Logged in"),
            });
            exit_code(&result)
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let result = ApiResult::from_result(
                auth::register(&api, &email, &password, &name).await,
                REGISTER_FAILED,
            );
            output::report(&result, json, |ack| {
                output::print_success(
                    ack.message
                        .as_deref()
                        .unwrap_or("Registered, check your email for the confirmation code"),
                )
            });
            exit_code(&result)
        }
        Command::Confirm { email, code } => {
            let result = ApiResult::from_result(
                auth::confirm_sign_up(&api, &email, &code).await,
                CONFIRM_FAILED,
            );
            output::report(&result, json, |ack| {
                output::print_success(ack.message.as_deref().unwrap_or("Account confirmed"))
            });
            exit_code(&result)
        }
        Command::Logout => {
            let result = ApiResult::from_result(auth::logout(api.store()).await, LOGOUT_FAILED);
            output::report(&result, json, |_| output::print_success("Logged out"));
            exit_code(&result)
        }
        Command::Whoami => {
            let user = auth::current_user(api.store(), api.premium_group())
                .await
                .ok_or_else(|| DomainError::new(DomainErrorKind::Auth(AuthErrorKind::LoginRequired)));
            let result = ApiResult::from_result(user, LOGIN_FAILED);
            output::report(&result, json, output::print_user);
            exit_code(&result)
        }
        Command::Todo(command) => run_todo(&api, command, json).await,
        Command::Tag(command) => run_tag(&api, command, json).await,
    };

    Ok(code)
}

async fn run_todo(api: &TodoApiClient, command: TodoCommand, json: bool) -> ExitCode {
    match command {
        TodoCommand::List => {
            let result = ApiResult::from_result(todo::find_all(api).await, FETCH_TODOS_FAILED);
            output::report(&result, json, |todos| output::print_todos(todos));
            exit_code(&result)
        }
        TodoCommand::Show { id } => {
            let result = ApiResult::from_result(todo::find_by_id(api, &id).await, FETCH_TODO_FAILED);
            output::report(&result, json, output::print_todo);
            exit_code(&result)
        }
        TodoCommand::Add {
            description,
            due,
            tags,
        } => {
            let created = async {
                let due_date = due.as_deref().map(todo::parse_due_date).transpose()?;
                todo::create(
                    api,
                    todos::NewTodo {
                        description,
                        due_date,
                        tag_ids: tags,
                    },
                )
                .await
            };
            let result = ApiResult::from_result(created.await, CREATE_TODO_FAILED);
            output::report(&result, json, |todo| {
                output::print_success(&format!("Created todo {}", todo.id))
            });
            exit_code(&result)
        }
        TodoCommand::Edit {
            id,
            description,
            due,
            clear_due,
            tags,
        } => {
            let updated = async {
                let due_date = match (due, clear_due) {
                    (_, true) => Some(None),
                    (Some(due), false) => Some(Some(todo::parse_due_date(&due)?)),
                    (None, false) => None,
                };
                todo::update(
                    api,
                    &id,
                    todos::Changes {
                        description,
                        due_date,
                        is_done: None,
                        tag_ids: tags,
                    },
                )
                .await
            };
            let result = ApiResult::from_result(updated.await, UPDATE_TODO_FAILED);
            output::report(&result, json, |_| {
                output::print_success(&format!("Updated todo {id}"))
            });
            exit_code(&result)
        }
        TodoCommand::Done { id } => {
            let toggled = async {
                let current = todo::find_by_id(api, &id).await?;
                todo::toggle_done(api, &current).await
            };
            let result = ApiResult::from_result(toggled.await, UPDATE_TODO_FAILED);
            output::report(&result, json, |is_done| {
                let state = if *is_done { "done" } else { "open" };
                output::print_success(&format!("Marked todo {id} as {state}"))
            });
            exit_code(&result)
        }
        TodoCommand::Delete { id } => {
            let result = ApiResult::from_result(todo::delete(api, &id).await, DELETE_TODO_FAILED);
            output::report(&result, json, |_| {
                output::print_success(&format!("Deleted todo {id}"))
            });
            exit_code(&result)
        }
    }
}

async fn run_tag(api: &TodoApiClient, command: TagCommand, json: bool) -> ExitCode {
    match command {
        TagCommand::List => {
            let result = ApiResult::from_result(tag::find_all(api).await, FETCH_TAGS_FAILED);
            output::report(&result, json, |tags| output::print_tags(tags));
            exit_code(&result)
        }
        TagCommand::Add { name } => {
            let result = ApiResult::from_result(tag::create(api, &name).await, CREATE_TAG_FAILED);
            output::report(&result, json, |tag| {
                output::print_success(&format!("Created tag {} ({})", tag.name, tag.id))
            });
            exit_code(&result)
        }
        TagCommand::Delete { id } => {
            let result = ApiResult::from_result(tag::delete(api, &id).await, DELETE_TAG_FAILED);
            output::report(&result, json, |_| {
                output::print_success(&format!("Deleted tag {id}"))
            });
            exit_code(&result)
        }
        TagCommand::TodoTags { todo_id } => {
            let result = ApiResult::from_result(
                tag::find_by_todo(api, &todo_id).await,
                FETCH_TODO_TAGS_FAILED,
            );
            output::report(&result, json, |tags| output::print_tags(tags));
            exit_code(&result)
        }
        TagCommand::Assign { todo_id, tag_id } => {
            let result = ApiResult::from_result(
                tag::assign_to_todo(api, &todo_id, &tag_id).await,
                ASSIGN_TAG_FAILED,
            );
            output::report(&result, json, |_| {
                output::print_success(&format!("Assigned tag {tag_id} to todo {todo_id}"))
            });
            exit_code(&result)
        }
        TagCommand::Unassign { todo_id, tag_id } => {
            let result = ApiResult::from_result(
                tag::remove_from_todo(api, &todo_id, &tag_id).await,
                REMOVE_TAG_FAILED,
            );
            output::report(&result, json, |_| {
                output::print_success(&format!("Removed tag {tag_id} from todo {todo_id}"))
            });
            exit_code(&result)
        }
    }
}

fn exit_code<T: serde::Serialize>(result: &ApiResult<T>) -> ExitCode {
    if result.success {
        ExitCode::SUCCESS
    } else if result.login_required {
        ExitCode::from(EXIT_LOGIN_REQUIRED)
    } else {
        ExitCode::FAILURE
    }
}
