use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Email, Money, Priority, Project, TaskItem, User, UserRole};
use std::hint::black_box;

fn bench_email_parse(c: &mut Criterion) {
    c.bench_function("domain/email_parse", |b| {
        b.iter(|| Email::parse(black_box("  Ada.Lovelace@Example.COM ")).unwrap());
    });
}

fn bench_money_add(c: &mut Criterion) {
    let left = Money::new(1_250, "USD").unwrap();
    let right = Money::new(99_999, "USD").unwrap();

    c.bench_function("domain/money_add", |b| {
        b.iter(|| black_box(&left).add(black_box(&right)).unwrap());
    });
}

fn bench_project_lifecycle(c: &mut Criterion) {
    let owner = User::create("pm@example.com", "PM", UserRole::Manager).unwrap();
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    c.bench_function("domain/project_with_ten_tasks", |b| {
        b.iter(|| {
            let mut project = Project::create("Bench", None, &owner, None, start, None).unwrap();
            let mut tasks = Vec::with_capacity(10);
            for i in 0..10 {
                let task = TaskItem::create(
                    domain::AggregateRoot::id(&project),
                    &format!("Task {i}"),
                    None,
                    Priority::Medium,
                    None,
                )
                .unwrap();
                project.add_task(&task).unwrap();
                tasks.push(task);
            }
            project.activate().unwrap();
            for task in &mut tasks {
                task.start().unwrap();
                task.complete().unwrap();
            }
            project.hydrate_tasks(tasks);
            project.complete().unwrap();
            project
        });
    });
}

criterion_group!(
    benches,
    bench_email_parse,
    bench_money_add,
    bench_project_lifecycle
);
criterion_main!(benches);
