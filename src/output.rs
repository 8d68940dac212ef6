use chrono::{DateTime, Utc};
use colored::*;
use domain::{tags, todos, users, ApiResult};
use serde::Serialize;

/// Print `result` either as JSON or, on success, through `render`.
pub fn report<T: Serialize>(result: &ApiResult<T>, json: bool, render: impl FnOnce(&T)) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("{} {err}", "✗".red()),
        }
        return;
    }

    match (&result.data, &result.message) {
        (Some(data), _) if result.success => render(data),
        (_, Some(message)) => eprintln!("{} {}", "✗".red(), message),
        _ => eprintln!("{} Request failed", "✗".red()),
    }

    if result.login_required {
        eprintln!("{} Run `todo login` to start a new session", "→".blue());
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_todos(todos: &[todos::Model]) {
    if todos.is_empty() {
        println!("{}", "No todos yet".dimmed());
        return;
    }

    let now = Utc::now();
    for todo in todos {
        println!("{}", todo_line(todo, now));
    }

    let done = todos.iter().filter(|t| t.is_done).count();
    println!(
        "\n{}: {} open, {} done",
        "Total".bold(),
        (todos.len() - done).to_string().yellow(),
        done.to_string().green()
    );
}

pub fn print_todo(todo: &todos::Model) {
    println!("{}", todo_line(todo, Utc::now()));
    println!("   {} {}", "id:".dimmed(), todo.id);
    println!("   {} {}", "created:".dimmed(), todo.created_at.to_rfc3339());
    if todo.was_updated() {
        println!("   {} {}", "updated:".dimmed(), todo.updated_at.to_rfc3339());
    }
}

pub fn print_tags(tags: &[tags::Model]) {
    if tags.is_empty() {
        println!("{}", "No tags".dimmed());
        return;
    }

    for tag in tags {
        println!("{} {}", tag.id.dimmed(), tag.name.cyan());
    }
}

pub fn print_user(user: &users::Model) {
    let tier = if user.user_type.is_premium() {
        user.user_type.to_string().yellow().bold()
    } else {
        user.user_type.to_string().normal()
    };

    println!("{} ({})", user.display_name().bold(), tier);
    if let Some(username) = &user.username {
        println!("   {} {}", "username:".dimmed(), username);
    }
    if let Some(sub) = &user.sub {
        println!("   {} {}", "sub:".dimmed(), sub);
    }
}

/// One line summary of a todo: check box, description, due date and tags.
fn todo_line(todo: &todos::Model, now: DateTime<Utc>) -> String {
    let check = if todo.is_done { "[x]" } else { "[ ]" };
    let description = if todo.is_done {
        todo.description.strikethrough().dimmed().to_string()
    } else {
        todo.description.clone()
    };

    let mut line = format!("{check} {description} {}", todo.id.dimmed());

    if let Some(due) = todo.due_date {
        let due_text = format!("due {}", due.format("%Y-%m-%d"));
        let due_text = if todo.is_overdue(now) {
            due_text.red().to_string()
        } else {
            due_text.dimmed().to_string()
        };
        line.push_str(&format!(" ({due_text})"));
    }

    if !todo.tags.is_empty() {
        let names: Vec<String> = todo
            .tags
            .iter()
            .map(|tag| format!("#{}", tag.name))
            .collect();
        line.push_str(&format!(" {}", names.join(" ").cyan()));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn todo(is_done: bool, due: Option<&str>) -> todos::Model {
        serde_json::from_value(json!({
            "todoId": "t-1",
            "description": "Buy milk",
            "dueDate": due,
            "isDone": is_done,
            "tags": [{ "tagId": "g-1", "tagName": "home" }],
            "createAt": "2024-05-01T10:00:00Z",
            "updateAt": "2024-05-01T10:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_todo_line_shows_state_due_date_and_tags() {
        colored::control::set_override(false);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();

        let line = todo_line(&todo(false, Some("2024-06-01T00:00:00Z")), now);

        assert_eq!(line, "[ ] Buy milk t-1 (due 2024-06-01) #home");
    }

    #[test]
    fn test_done_todo_is_checked() {
        colored::control::set_override(false);
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();

        let line = todo_line(&todo(true, None), now);

        assert!(line.starts_with("[x] Buy milk"));
        assert!(!line.contains("due"));
    }
}
