use std::fs::File;
use std::time::Duration;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use tabula_tasks::browse::{task_browser, task_source};
use tabula_tasks::seed::{SeedConfig, TaskSeeder};

#[tokio::main]
async fn main() {
    let log_file = File::create("tabula-tasks.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let tasks = TaskSeeder::new(SeedConfig::default()).generate();
    info!("seeded {} tasks", tasks.len());
    println!("seeded {} tasks", tasks.len());

    let browser = task_browser(
        |task| info!("detail requested: {} ({})", task.title, task.id),
        |ids| {
            info!(
                "bulk action dispatched: {}",
                serde_json::to_string(&ids).unwrap_or_default()
            );
        },
    );

    browser.load(task_source(tasks, Duration::from_secs(3)));
    println!("fetching...");
    while !browser.fetch().is_ready() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let pager = browser.pager();
    println!(
        "page {} of {}: rows {}..{} of {}",
        pager.display_page(),
        pager.page_count(),
        pager.from_row(),
        pager.to_row(),
        pager.total_count
    );

    browser.search().set_text("Task 1");
    tokio::time::sleep(Duration::from_millis(400)).await;
    println!(
        "keyword {:?}: {} matches",
        browser.query().keyword().unwrap_or_default(),
        browser.view().total_count
    );

    browser.query().set_sort("title");
    for id in browser.page_ids().into_iter().take(3) {
        browser.selection().toggle(&id);
    }
    println!("selected {} tasks", browser.selection().len());

    browser.request_bulk_action();
    browser.confirm_bulk_action();
    println!("bulk action confirmed, selection now {}", browser.selection().len());

    if let Some(task) = browser.view().rows.first() {
        browser.request_detail(task);
        println!("opened detail for {}", task.title);
    }

    browser.detach();
}
