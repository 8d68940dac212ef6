pub mod todo_api;
