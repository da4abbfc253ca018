/// Storage key holding the JSON array of tasks.
pub const TASKS_COLLECTION: &str = "tasks";

/// Storage key holding the JSON array of categories.
pub const CATEGORIES_COLLECTION: &str = "categories";

/// Name of the application-owned calendar events are written to.
pub const APP_CALENDAR_NAME: &str = "Task Manager";

/// Owner account recorded on the application calendar.
pub const APP_CALENDAR_OWNER: &str = "personal";

pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Reminders attached to every synced event, in minutes before start.
pub const EVENT_REMINDER_MINUTES: [i64; 2] = [1, 60];
