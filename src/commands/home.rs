use anyhow::Result;
use owo_colors::OwoColorize;
use taskdir_core::views;

use super::Context;
use crate::render::Render;

/// Number of in-progress tasks shown on the home screen
const IN_PROGRESS_LIMIT: usize = 5;

pub fn run(ctx: &Context) -> Result<()> {
    let categories = ctx.store.categories()?;
    let tasks = ctx.store.tasks()?;

    println!("{}", "In progress".bold());
    let in_progress = views::in_progress(&tasks);
    if in_progress.is_empty() {
        println!("   {}", "Nothing yet. Add a task with: taskdir task add".dimmed());
    }
    for task in in_progress.iter().take(IN_PROGRESS_LIMIT) {
        println!("   {}", task.render());
    }
    if in_progress.len() > IN_PROGRESS_LIMIT {
        let more = format!("(+{} more)", in_progress.len() - IN_PROGRESS_LIMIT);
        println!("   {}", more.dimmed());
    }

    println!();
    println!("{}", "Task groups".bold());
    if categories.is_empty() {
        println!("   {}", "No categories yet".dimmed());
    }
    for summary in views::category_summaries(&categories, &tasks) {
        println!("   {}", summary.render());
    }

    Ok(())
}
