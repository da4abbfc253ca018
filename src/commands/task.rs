use anyhow::{Result, bail};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use taskdir_core::calendar::{
    CalendarBridge, CalendarProvider, LocalCalendarProvider, SyncOutcome,
};
use taskdir_core::model::{Category, Task, TaskDraft};
use taskdir_core::store::{KeyValueStore, TaskStore};
use taskdir_core::views;

use super::Context;
use crate::render::{Render, render_task_details};
use crate::utils::{parse_date, parse_optional, parse_time};

/// Raw `task add` input, before parsing.
pub struct AddArgs {
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub todo: Vec<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Save the task, then mirror it into the calendar unless `sync` is off.
///
/// A calendar problem is printed but never fails the command: the task is
/// already stored at that point.
pub async fn add(ctx: &Context, args: AddArgs, sync: bool) -> Result<()> {
    let category = match args.category.as_deref() {
        Some(key) => Some(ctx.store.find_category(key)?),
        None => None,
    };

    let draft = TaskDraft {
        title: args.title,
        category_id: category.as_ref().map(|c| c.id.clone()),
        description: args.description,
        checklist: args.todo,
        start_date: parse_optional(args.start.as_deref(), parse_date)?,
        end_date: parse_optional(args.end.as_deref(), parse_date)?,
        start_time: parse_optional(args.start_time.as_deref(), parse_time)?,
        end_time: parse_optional(args.end_time.as_deref(), parse_time)?,
    };

    let bridge = if sync {
        let provider =
            LocalCalendarProvider::from_config(&ctx.config).with_prompt(ask_calendar_access);
        Some(CalendarBridge::new(provider, ctx.config.tz()?))
    } else {
        None
    };

    let (task, outcome) = save_then_sync(&ctx.store, &draft, category, bridge.as_ref()).await?;

    println!("{}", format!("  Created: {}", task.title).green());
    if let Some(outcome) = outcome {
        println!("  {}", outcome.render());
    }

    Ok(())
}

/// Store `draft`, then hand the stored task to `bridge` if there is one.
///
/// Only the save can fail; whatever happens on the calendar side comes back
/// as a [`SyncOutcome`].
async fn save_then_sync<S, P>(
    store: &TaskStore<S>,
    draft: &TaskDraft,
    category: Option<Category>,
    bridge: Option<&CalendarBridge<P>>,
) -> Result<(Task, Option<SyncOutcome>)>
where
    S: KeyValueStore,
    P: CalendarProvider,
{
    let task = store.add_task(draft)?;

    let outcome = match (bridge, category) {
        (Some(bridge), Some(category)) => Some(bridge.sync(&task, &category).await),
        _ => None,
    };

    Ok((task, outcome))
}

fn ask_calendar_access() -> bool {
    Confirm::new()
        .with_prompt("Allow taskdir to add this task to your calendar?")
        .default(true)
        .interact()
        .unwrap_or(false)
}

pub fn list(ctx: &Context, category: Option<&str>, by_date: bool) -> Result<()> {
    let mut tasks = ctx.store.tasks()?;

    if let Some(key) = category {
        let category = ctx.store.find_category(key)?;
        tasks = views::tasks_in_category(&tasks, &category.id);
    }

    let tasks = if by_date {
        views::chronological(&tasks)
    } else {
        views::in_progress(&tasks)
    };

    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return Ok(());
    }

    for task in &tasks {
        println!("{}  {}", short_id(task).dimmed(), task.render());
    }

    Ok(())
}

pub fn show(ctx: &Context, key: &str) -> Result<()> {
    let task = ctx.resolve_task(key)?;
    let category = ctx.store.category(&task.category_id)?;

    for line in render_task_details(&task, &category) {
        println!("{}", line);
    }

    Ok(())
}

pub fn remove(ctx: &Context, key: &str) -> Result<()> {
    let task = ctx.resolve_task(key)?;
    let removed = ctx.store.remove_task(&task.id)?;

    println!("{}", format!("  Removed: {}", removed.title).red());

    Ok(())
}

pub fn check(ctx: &Context, task_key: &str, item_key: &str) -> Result<()> {
    let task = ctx.resolve_task(task_key)?;
    let item_id = resolve_item(&task, item_key)?;

    let updated = ctx.store.toggle_checklist_item(&task.id, &item_id)?;

    if let Some(item) = updated.checklist_item(&item_id) {
        let mark = if item.status.is_done() {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        println!("  {} {}", mark, item.label);
    }
    println!("  {}", updated.progress().render());

    Ok(())
}

/// A 1-based entry number or an item id.
fn resolve_item(task: &Task, key: &str) -> Result<String> {
    if let Ok(n) = key.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| task.to_do.get(i)) {
            Some(item) => Ok(item.id.clone()),
            None => bail!(
                "'{}' has {} checklist {}",
                task.title,
                task.to_do.len(),
                if task.to_do.len() == 1 { "entry" } else { "entries" }
            ),
        };
    }

    Ok(key.to_string())
}

fn short_id(task: &Task) -> &str {
    task.id.get(..8).unwrap_or(&task.id)
}
