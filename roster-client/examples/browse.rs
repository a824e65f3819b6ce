//! Browse both collections of a running roster service
//!
//! ```text
//! ROSTER_API_URL=http://localhost:2200 cargo run -p roster-client --example browse
//! ```

use roster_client::{
    ClientConfig, Department, DepartmentList, Employee, EmployeeList, RestDataSource, logger,
};
use shared::util::format_display_date;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    logger::init_from_config(&config)?;

    let http = config.build_http_client()?;

    let employees: EmployeeList<_> =
        EmployeeList::new(RestDataSource::<Employee, _>::new(http.clone()), config.page_size);
    employees.activate().await;
    let page = employees.snapshot();
    println!("Employees (page {} of {})", page.page_index + 1, page.total_pages);
    for employee in &page.records {
        println!(
            "  {:>4}  {:<24} {:<28} {:>10}  {}",
            employee.id,
            employee.name,
            employee.email,
            employee.salary,
            format_display_date(employee.date_of_joining)
        );
    }
    if let Some(message) = employees.error_message() {
        println!("  {message}");
    }
    println!("  previous: {}  next: {}", page.can_previous(), page.can_next());

    let departments: DepartmentList<_> =
        DepartmentList::new(RestDataSource::<Department, _>::new(http), config.page_size);
    departments.activate().await;
    let page = departments.snapshot();
    println!("Departments (page {} of {})", page.page_index + 1, page.total_pages);
    for department in &page.records {
        println!("  {:>4}  {:<24} {}", department.id, department.name, department.location);
    }
    if let Some(message) = departments.error_message() {
        println!("  {message}");
    }

    Ok(())
}
