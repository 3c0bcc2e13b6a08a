//! Tests for departments, users, teams, memberships and medical leaves.

mod test_utils;

use chrono::{NaiveDate, Utc};
use hr_records::error::RepositoryError;
use hr_records::forms::{INVALID_CHOICE, REQUIRED};
use hr_records::models::{Membership, membership};
use hr_records::repositories::{
    CreateMedicalLeaveRequest, CreateMembershipRequest, DepartmentRepository, EmployeeRepository,
    MedicalLeaveRepository, MembershipRepository, TeamRepository, UserRepository,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{create_test_department, create_test_user, employee_fields, setup_test_db};

#[tokio::test]
async fn test_department_delete_is_restricted_while_referenced() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let employees = EmployeeRepository::new(&db);
    let employee = employees
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;

    let departments = DepartmentRepository::new(&db);
    assert!(matches!(
        departments.delete_department(department.id).await,
        Err(RepositoryError::Integrity(_))
    ));
    assert_eq!(departments.get_department(department.id).await?.name, "Accounting");

    employees.delete_employee(employee.id).await?;
    departments.delete_department(department.id).await?;
    assert!(matches!(
        departments.get_department(department.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_user_delete_is_restricted_while_owning_employees() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let employee = EmployeeRepository::new(&db)
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;

    let users = UserRepository::new(&db);
    assert!(matches!(
        users.delete_user(owner.id).await,
        Err(RepositoryError::Integrity(_))
    ));

    EmployeeRepository::new(&db).delete_employee(employee.id).await?;
    users.delete_user(owner.id).await?;
    assert!(users.list_users().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_usernames_are_unique_and_required() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let users = UserRepository::new(&db);

    let user = users.create_user("  ahtan ").await?;
    assert_eq!(user.username, "ahtan");
    assert_eq!(user.to_string(), "ahtan");

    assert!(matches!(
        users.create_user("ahtan").await,
        Err(RepositoryError::Integrity(_))
    ));

    let Err(RepositoryError::Validation(errors)) = users.create_user("   ").await else {
        panic!("blank username must be rejected");
    };
    assert_eq!(errors.get("username"), [REQUIRED.to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_department_name_length_is_checked() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let departments = DepartmentRepository::new(&db);

    let Err(RepositoryError::Validation(errors)) =
        departments.create_department(&"x".repeat(256)).await
    else {
        panic!("overlong name must be rejected");
    };
    assert_eq!(
        errors.get("name"),
        ["Ensure this value has at most 255 characters (it has 256).".to_string()]
    );
    assert!(departments.list_departments().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_team_lists_members_and_delete_cascades_memberships() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let employees = EmployeeRepository::new(&db);
    let first = employees
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;
    let second = employees
        .create_employee(employee_fields(234567, owner.id, department.id))
        .await?;

    let teams = TeamRepository::new(&db);
    let team = teams.create_team("Audit").await?;
    let memberships = MembershipRepository::new(&db);
    for (employee_id, role) in [(first.id, "Lead"), (second.id, "Member")] {
        memberships
            .create_membership(CreateMembershipRequest {
                employee_id,
                team_id: team.id,
                role: role.to_string(),
            })
            .await?;
    }

    let members = teams.list_members(team.id).await?;
    let roles: Vec<(&str, i32)> = members
        .iter()
        .map(|(membership, employee)| (membership.role.as_str(), employee.employee_number))
        .collect();
    assert_eq!(roles, vec![("Lead", 123456), ("Member", 234567)]);

    teams.delete_team(team.id).await?;

    let remaining = Membership::find()
        .filter(membership::Column::TeamId.eq(team.id))
        .count(&db)
        .await?;
    assert_eq!(remaining, 0);
    assert_eq!(employees.list_employees().await?.len(), 2);
    assert!(matches!(
        teams.list_members(team.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_membership_role_update_restamps_joined_date() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let employee = EmployeeRepository::new(&db)
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;
    let team = TeamRepository::new(&db).create_team("Audit").await?;

    let memberships = MembershipRepository::new(&db);
    let created = memberships
        .create_membership(CreateMembershipRequest {
            employee_id: employee.id,
            team_id: team.id,
            role: "Member".to_string(),
        })
        .await?;
    let today = Utc::now().date_naive();
    assert_eq!(created.joined_date, today);
    assert_eq!(created.to_string(), format!("Membership {}", created.id));

    db.execute_unprepared(&format!(
        "UPDATE memberships SET joined_date = '2020-01-01' WHERE id = {}",
        created.id
    ))
    .await?;
    assert_eq!(
        memberships.get_membership(created.id).await?.joined_date,
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    );

    let updated = memberships.update_role(created.id, "Lead").await?;
    assert_eq!(updated.role, "Lead");
    assert_eq!(updated.joined_date, today);
    Ok(())
}

#[tokio::test]
async fn test_membership_requires_existing_employee_and_team() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let memberships = MembershipRepository::new(&db);

    let Err(RepositoryError::Validation(errors)) = memberships
        .create_membership(CreateMembershipRequest {
            employee_id: 1,
            team_id: 1,
            role: "Member".to_string(),
        })
        .await
    else {
        panic!("dangling references must be rejected");
    };
    assert_eq!(errors.get("employee"), [INVALID_CHOICE.to_string()]);
    assert_eq!(errors.get("team"), [INVALID_CHOICE.to_string()]);

    assert!(matches!(
        memberships.update_role(99, "Lead").await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        memberships.delete_membership(99).await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_medical_leaves_list_and_delete() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner").await?;
    let department = create_test_department(&db, "Accounting").await?;
    let employees = EmployeeRepository::new(&db);
    let employee = employees
        .create_employee(employee_fields(123456, owner.id, department.id))
        .await?;

    let leaves = MedicalLeaveRepository::new(&db);
    let leave = leaves
        .create_medical_leave(
            employee.id,
            CreateMedicalLeaveRequest {
                start_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            },
        )
        .await?;
    assert_eq!(leave.days(), 28);
    assert_eq!(
        leave.describe(&employee),
        "Medical leave (2021-03-01 to 2021-02-01) for Ah"
    );

    assert_eq!(leaves.list_for_employee(employee.id).await?, vec![leave.clone()]);
    assert_eq!(employees.remaining_leave(employee.id).await?, 13);

    leaves.delete_medical_leave(leave.id).await?;
    assert!(leaves.list_for_employee(employee.id).await?.is_empty());
    assert_eq!(employees.remaining_leave(employee.id).await?, 14);

    assert!(matches!(
        leaves.list_for_employee(employee.id + 1).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        leaves
            .create_medical_leave(
                employee.id + 1,
                CreateMedicalLeaveRequest {
                    start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
                },
            )
            .await,
        Err(RepositoryError::NotFound(_))
    ));
    Ok(())
}
