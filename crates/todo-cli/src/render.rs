//! Terminal rendering of lists, tasks, stats and notifications

use colored::{ColoredString, Colorize};
use todo_core::{Priority, PrioritySummary, Task, TodoList};
use todo_state::{Notification, NotificationLevel};
use tokio::sync::broadcast;

const RULE_WIDTH: usize = 50;
const BAR_WIDTH: usize = 24;

/// Tasks in display order: active first, completed after.
pub fn ordered_tasks(list: &TodoList) -> Vec<&Task> {
    list.active_tasks().chain(list.completed_tasks()).collect()
}

/// Task at a 1-based display position.
pub fn task_at(list: &TodoList, position: usize) -> Option<&Task> {
    ordered_tasks(list).into_iter().nth(position.checked_sub(1)?)
}

pub fn print_lists(lists: &[TodoList], active_id: Option<&str>) {
    if lists.is_empty() {
        println!(
            "{}",
            "You don't have any todo lists yet. Create one to get started!".dimmed()
        );
        return;
    }

    println!("{}", "My Todo Lists".cyan().bold());
    for (index, list) in lists.iter().enumerate() {
        let is_active = active_id.is_some() && list.id.as_deref() == active_id;
        let marker = if is_active { "*" } else { " " };
        let name = if is_active {
            list.name.cyan().bold()
        } else {
            list.name.normal()
        };
        println!(
            " {} {:>2}. {} {}",
            marker,
            index + 1,
            name,
            format!("({})", list.task_count()).dimmed()
        );
    }
}

pub fn print_list(list: &TodoList, show_completed: bool) {
    println!("{}", list.name.cyan().bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());

    if list.tasks.is_empty() {
        println!(
            "{}",
            "This todo list is empty. Add some tasks to get started!".dimmed()
        );
        return;
    }

    let tasks = ordered_tasks(list);
    let active_count = list.active_tasks().count();
    let mut position = 1;

    if active_count > 0 {
        println!("{}", format!("Active Tasks ({active_count})").magenta().bold());
        for task in &tasks[..active_count] {
            print_task(position, task);
            position += 1;
        }
    }

    let completed_count = tasks.len() - active_count;
    if completed_count > 0 && show_completed {
        println!(
            "{}",
            format!("Completed Tasks ({completed_count})").green().bold()
        );
        for task in &tasks[active_count..] {
            print_task(position, task);
            position += 1;
        }
    }
}

fn print_task(position: usize, task: &Task) {
    let checkbox = if task.done { "[x]" } else { "[ ]" };
    let title = if task.done {
        task.title.strikethrough().dimmed()
    } else {
        task.title.normal()
    };

    let mut line = format!(
        " {:>2}. {} {} {}",
        position,
        checkbox,
        title,
        priority_badge(task.priority)
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" {}", format!("due {due}").dimmed()));
    }
    println!("{line}");

    if let Some(description) = &task.description {
        println!("        {}", description.dimmed());
    }
}

fn priority_badge(priority: Priority) -> ColoredString {
    match priority {
        Priority::Low => "low".blue(),
        Priority::Medium => "medium".yellow(),
        Priority::High => "high".red(),
    }
}

pub fn print_stats(summary: &PrioritySummary) {
    println!("{}", "Tasks by Priority".cyan().bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());

    if summary.total() == 0 {
        println!("{}", "No tasks yet".dimmed());
        return;
    }

    for priority in Priority::ALL {
        let count = summary.count_for(priority);
        let percent = summary.percent_of_total(priority);
        // pad before coloring, ANSI codes confuse width specifiers
        let label = format!("{:<22}", stat_title(priority));
        let bar = "█".repeat((percent as usize * BAR_WIDTH) / 100);
        let (label, bar) = match priority {
            Priority::Low => (label.blue(), bar.blue()),
            Priority::Medium => (label.yellow(), bar.yellow()),
            Priority::High => (label.red(), bar.red()),
        };
        println!(
            "{} {:>3}  {} {}",
            label,
            count,
            format!("{:>3}% of total", percent).dimmed(),
            bar
        );
    }
    println!("{}", format!("{} tasks total", summary.total()).dimmed());
}

fn stat_title(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low Priority Tasks",
        Priority::Medium => "Medium Priority Tasks",
        Priority::High => "High Priority Tasks",
    }
}

/// Print any notifications the store has published since the last drain.
pub fn drain_notifications(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(note) = rx.try_recv() {
        match note.level {
            NotificationLevel::Success => println!("{} {}", "✓".green(), note.message.green()),
            NotificationLevel::Error => eprintln!("{} {}", "✗".red(), note.message.red()),
        }
    }
}
