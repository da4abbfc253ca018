use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use taskdir_core::model::CategoryDraft;
use taskdir_core::views;

use super::Context;
use crate::render::Render;

pub fn add(ctx: &Context, title: String) -> Result<()> {
    let category = ctx.store.add_category(&CategoryDraft::new(title))?;

    println!("{}", format!("  Created category: {}", category.title).green());

    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let categories = ctx.store.categories()?;

    if categories.is_empty() {
        println!("{}", "No categories yet. Add one with: taskdir category add <title>".dimmed());
        return Ok(());
    }

    let tasks = ctx.store.tasks()?;
    for summary in views::category_summaries(&categories, &tasks) {
        println!("{}", summary.render());
    }

    Ok(())
}

pub fn show(ctx: &Context, key: &str) -> Result<()> {
    let category = ctx.store.find_category(key)?;
    let tasks = views::tasks_in_category(&ctx.store.tasks()?, &category.id);

    println!("{}", category.render());

    if tasks.is_empty() {
        println!("   {}", "No tasks".dimmed());
    }
    for task in &tasks {
        println!("   {}", task.render());
    }

    Ok(())
}

pub fn remove(ctx: &Context, key: &str, yes: bool) -> Result<()> {
    let category = ctx.store.find_category(key)?;
    let task_count = views::tasks_in_category(&ctx.store.tasks()?, &category.id).len();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove '{}' and its {} {}?",
                category.title,
                task_count,
                if task_count == 1 { "task" } else { "tasks" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let removal = ctx.store.remove_category(&category.id)?;

    println!(
        "{}",
        format!(
            "  Removed category: {} ({} {})",
            removal.category.title,
            removal.removed_tasks.len(),
            if removal.removed_tasks.len() == 1 { "task" } else { "tasks" }
        )
        .red()
    );

    Ok(())
}
