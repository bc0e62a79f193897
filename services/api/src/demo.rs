use crate::infra::{sample_campus, InMemorySeatingRepository};
use chrono::Local;
use clap::Args;
use exam_seating::config::AppConfig;
use exam_seating::error::AppError;
use exam_seating::seating::{
    allocate, AcademicStatus, AllocationGrid, AllocationRequest, Conflict, ExamId, Room,
    RosterImporter, SeatingService, SeatingServiceError, StudentOrdering,
};
use exam_seating::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SeatingAllocateArgs {
    /// Student roster CSV (id,name,department,academic_status)
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Number of seat rows in the room
    #[arg(long)]
    pub(crate) rows: u32,
    /// Number of seats per row
    #[arg(long)]
    pub(crate) columns: u32,
    /// Shuffle the roster with this seed before allocating
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Seat detained students as well
    #[arg(long)]
    pub(crate) include_detained: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Exam identifier used for the demo charts
    #[arg(long)]
    pub(crate) exam_id: Option<String>,
    /// Shuffle the sample campus with this seed before each allocation
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_seating_allocation(args: SeatingAllocateArgs) -> Result<(), AppError> {
    let SeatingAllocateArgs {
        roster,
        rows,
        columns,
        seed,
        include_detained,
    } = args;

    let students = RosterImporter::from_path(&roster)?;
    let total = students.len();
    let pool: Vec<_> = students
        .into_iter()
        .filter(|student| include_detained || student.is_active())
        .collect();
    let ordering = seed
        .map(|seed| StudentOrdering::Seeded { seed })
        .unwrap_or_default();
    let pool = ordering.apply(pool);

    let room = Room::new("cli-room", roster_label(&roster), rows, columns);
    let allocation = allocate(&pool, &room)?;

    println!("Seating plan for {}", room.room_number);
    println!(
        "Roster: {} students ({} eligible) | Room: {} x {} ({} seats) | Order: {}",
        total,
        pool.len(),
        rows,
        columns,
        room.capacity,
        ordering.label()
    );
    if !include_detained && pool.len() < total {
        println!(
            "Skipped {} {} student(s)",
            total - pool.len(),
            AcademicStatus::Detained.label()
        );
    }
    render_grid(&allocation.snapshot());
    render_conflicts(allocation.conflicts());

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { exam_id, seed } = args;

    let config = AppConfig::load()?;
    if let Err(err) = telemetry::init(&config.telemetry) {
        eprintln!("telemetry disabled: {err}");
    }

    let exam_id = ExamId(exam_id.unwrap_or_else(|| "demo-endterm".to_string()));
    let ordering = seed
        .map(|seed| StudentOrdering::Seeded { seed })
        .unwrap_or_else(|| config.seating.default_ordering());

    let campus = sample_campus();
    let rooms = campus.rooms();
    let service = SeatingService::with_ordering(
        Arc::new(InMemorySeatingRepository::default()),
        Arc::new(campus),
        ordering,
    );

    println!("Exam seating demo ({})", exam_id.0);
    println!("Ordering: {}", ordering.label());

    for room in rooms {
        println!(
            "\n== {} ({} x {}, {} seats{})",
            room.room_number,
            room.rows,
            room.columns,
            room.capacity,
            room.building
                .as_deref()
                .map(|building| format!(", {building}"))
                .unwrap_or_default()
        );

        let request = AllocationRequest {
            exam_id: exam_id.clone(),
            room_id: room.id.clone(),
            ordering: None,
        };
        match service.allocate(request) {
            Ok(summary) => {
                println!(
                    "Seated {} students at {}",
                    summary.chart.seated(),
                    summary
                        .chart
                        .allocated_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                );
                render_grid(&summary.grid);
                render_conflicts(&summary.chart.conflicts);
            }
            Err(SeatingServiceError::Allocation(err)) => {
                println!("Allocation skipped: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn roster_label(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "roster".to_string())
}

fn render_grid(grid: &AllocationGrid) {
    let width = grid
        .cells()
        .iter()
        .flatten()
        .flatten()
        .map(|cell| cell.roll_number.len() + cell.department.len() + 3)
        .max()
        .unwrap_or(5);

    for row in grid.cells() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(cell) => format!(
                    "{:<width$}",
                    format!("{} [{}]", cell.roll_number, cell.department)
                ),
                None => format!("{:<width$}", "."),
            })
            .collect();
        println!("  {}", line.join(" | "));
    }
}

fn render_conflicts(conflicts: &[Conflict]) {
    if conflicts.is_empty() {
        println!("Adjacency conflicts: none");
        return;
    }

    println!("Adjacency conflicts: {}", conflicts.len());
    for conflict in conflicts {
        println!("- seat {} ({})", conflict.seat, conflict.department);
    }
}
