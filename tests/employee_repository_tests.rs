//! Employee workflow tests against an in-memory SQLite database.

mod test_utils;

use chrono::NaiveDate;
use hr_records::error::RepositoryError;
use hr_records::forms::{EmployeeForm, INVALID_CHOICE};
use hr_records::models::{MedicalLeave, Membership, medical_leave, membership};
use hr_records::repositories::{
    CreateMedicalLeaveRequest, CreateMembershipRequest, EmployeeRepository,
    MedicalLeaveRepository, MembershipRepository, TeamRepository,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{create_test_department, create_test_user, employee_fields, setup_test_db};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_accounting_scenario_end_to_end() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "hr-admin").await?;
    let accounting = create_test_department(&db, "Accounting").await?;

    let form = EmployeeForm {
        employee_number: Some("123456".to_string()),
        first_name: Some("Ah".to_string()),
        last_name: Some("Tan".to_string()),
        salary: Some("2000".to_string()),
        months_employed: Some("3".to_string()),
        owner: Some(owner.id.to_string()),
        department: Some(accounting.id.to_string()),
        leave_balance: Some("14".to_string()),
    };
    let fields = form.validate().expect("form is valid");

    let repo = EmployeeRepository::new(&db);
    let employee = repo.create_employee(fields).await?;

    assert_eq!(employee.leave_balance, 14);
    assert_eq!(repo.remaining_leave(employee.id).await?, 14);
    assert_eq!(employee.to_string(), "123456 - Ah Tan");

    let leave = MedicalLeaveRepository::new(&db)
        .create_medical_leave(
            employee.id,
            CreateMedicalLeaveRequest {
                start_date: date(2021, 1, 1),
                end_date: date(2021, 1, 3),
            },
        )
        .await?;

    assert_eq!(leave.days(), 2);
    assert_eq!(repo.remaining_leave(employee.id).await?, 13);
    Ok(())
}

#[tokio::test]
async fn test_leave_balance_defaults_to_fourteen() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Sales").await?;

    let form = EmployeeForm {
        employee_number: Some("654321".to_string()),
        first_name: Some("Mei".to_string()),
        last_name: Some("Lim".to_string()),
        salary: Some("1500".to_string()),
        months_employed: Some("0".to_string()),
        owner: Some(owner.id.to_string()),
        department: Some(department.id.to_string()),
        leave_balance: None,
    };

    let repo = EmployeeRepository::new(&db);
    let created = repo.create_employee(form.validate().expect("form is valid")).await?;
    let fetched = repo.get_employee(created.id).await?;

    assert_eq!(fetched.leave_balance, 14);
    Ok(())
}

#[tokio::test]
async fn test_list_returns_every_employee_in_id_order() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Ops").await?;
    let repo = EmployeeRepository::new(&db);

    assert!(repo.list_employees().await?.is_empty());

    let first = repo
        .create_employee(employee_fields(100000, owner.id, department.id))
        .await?;
    let second = repo
        .create_employee(employee_fields(999999, owner.id, department.id))
        .await?;

    let ids: Vec<i32> = repo.list_employees().await?.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_every_field() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "first-owner").await?;
    let new_owner = create_test_user(&db, "second-owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let new_department = create_test_department(&db, "Engineering").await?;
    let repo = EmployeeRepository::new(&db);

    let employee = repo
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;

    let mut replacement = employee_fields(234567, new_owner.id, new_department.id);
    replacement.first_name = "Siew".to_string();
    replacement.last_name = "Ling".to_string();
    replacement.salary = 3100;
    replacement.months_employed = 12;
    replacement.leave_balance = 20;

    let updated = repo.update_employee(employee.id, replacement).await?;
    let fetched = repo.get_employee(employee.id).await?;

    assert_eq!(updated, fetched);
    assert_eq!(fetched.employee_number, 234567);
    assert_eq!(fetched.first_name, "Siew");
    assert_eq!(fetched.last_name, "Ling");
    assert_eq!(fetched.salary, 3100);
    assert_eq!(fetched.months_employed, 12);
    assert_eq!(fetched.leave_balance, 20);
    assert_eq!(fetched.user_id, new_owner.id);
    assert_eq!(fetched.department_id, new_department.id);
    Ok(())
}

#[tokio::test]
async fn test_update_may_keep_own_employee_number() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    let employee = repo
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;

    let mut same_number = employee_fields(123456, owner.id, department.id);
    same_number.salary = 2500;
    let updated = repo.update_employee(employee.id, same_number).await?;

    assert_eq!(updated.salary, 2500);
    Ok(())
}

#[tokio::test]
async fn test_delete_cascades_to_leaves_and_memberships() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    let employee = repo
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;
    MedicalLeaveRepository::new(&db)
        .create_medical_leave(
            employee.id,
            CreateMedicalLeaveRequest {
                start_date: date(2021, 1, 1),
                end_date: date(2021, 1, 3),
            },
        )
        .await?;
    let team = TeamRepository::new(&db).create_team("Audit").await?;
    MembershipRepository::new(&db)
        .create_membership(CreateMembershipRequest {
            employee_id: employee.id,
            team_id: team.id,
            role: "Member".to_string(),
        })
        .await?;

    repo.delete_employee(employee.id).await?;

    assert!(matches!(
        repo.get_employee(employee.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    let leaves = MedicalLeave::find()
        .filter(medical_leave::Column::EmployeeId.eq(employee.id))
        .count(&db)
        .await?;
    let memberships = Membership::find()
        .filter(membership::Column::EmployeeId.eq(employee.id))
        .count(&db)
        .await?;
    assert_eq!(leaves, 0);
    assert_eq!(memberships, 0);

    // The team itself survives.
    assert_eq!(TeamRepository::new(&db).get_team(team.id).await?.name, "Audit");
    Ok(())
}

#[tokio::test]
async fn test_missing_employee_is_not_found() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    assert!(matches!(
        repo.get_employee(42).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.update_employee(42, employee_fields(123456, owner.id, department.id))
            .await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete_employee(42).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.remaining_leave(42).await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_employee_number_is_integrity_violation() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    let first = repo
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;
    let second = repo
        .create_employee(employee_fields(234567, owner.id, department.id))
        .await?;

    assert!(matches!(
        repo.create_employee(employee_fields(123456, owner.id, department.id))
            .await,
        Err(RepositoryError::Integrity(_))
    ));
    assert!(matches!(
        repo.update_employee(second.id, employee_fields(first.employee_number, owner.id, department.id))
            .await,
        Err(RepositoryError::Integrity(_))
    ));

    // Nothing was written by the failed attempts.
    assert_eq!(repo.list_employees().await?.len(), 2);
    assert_eq!(repo.get_employee(second.id).await?.employee_number, 234567);
    Ok(())
}

#[tokio::test]
async fn test_unknown_department_or_owner_is_field_error() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    let Err(RepositoryError::Validation(errors)) = repo
        .create_employee(employee_fields(123456, owner.id, department.id + 100))
        .await
    else {
        panic!("unknown department must be a validation error");
    };
    assert_eq!(errors.get("department"), [INVALID_CHOICE.to_string()]);
    assert!(errors.get("owner").is_empty());

    let Err(RepositoryError::Validation(errors)) = repo
        .create_employee(employee_fields(123456, owner.id + 100, department.id))
        .await
    else {
        panic!("unknown owner must be a validation error");
    };
    assert_eq!(errors.get("owner"), [INVALID_CHOICE.to_string()]);

    assert!(repo.list_employees().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remaining_leave_goes_negative_when_overdrawn() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let repo = EmployeeRepository::new(&db);

    let mut fields = employee_fields(123456, owner.id, department.id);
    fields.leave_balance = 1;
    let employee = repo.create_employee(fields).await?;

    let leaves = MedicalLeaveRepository::new(&db);
    for day in 1..=3 {
        leaves
            .create_medical_leave(
                employee.id,
                CreateMedicalLeaveRequest {
                    start_date: date(2021, 2, day),
                    end_date: date(2021, 2, day),
                },
            )
            .await?;
    }

    assert_eq!(repo.remaining_leave(employee.id).await?, -2);
    Ok(())
}
