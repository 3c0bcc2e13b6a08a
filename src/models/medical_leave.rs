//! Medical leave entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// A period of medical leave taken by an employee
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medical_leaves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub employee_id: i32,

    pub start_date: Date,

    pub end_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Length of the leave in days, regardless of the order the dates were entered in.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().abs()
    }

    /// Human readable label naming the employee on leave.
    pub fn describe(&self, employee: &super::employee::Model) -> String {
        format!(
            "Medical leave ({} to {}) for {}",
            self.start_date, self.end_date, employee.first_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(start: (i32, u32, u32), end: (i32, u32, u32)) -> Model {
        Model {
            id: 1,
            employee_id: 1,
            start_date: Date::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: Date::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_days_between_start_and_end() {
        assert_eq!(leave((2021, 1, 1), (2021, 1, 3)).days(), 2);
        assert_eq!(leave((2021, 1, 1), (2021, 1, 1)).days(), 0);
    }

    #[test]
    fn test_days_is_absolute_for_reversed_dates() {
        assert_eq!(leave((2021, 3, 1), (2021, 2, 1)).days(), 28);
    }

    #[test]
    fn test_describe_names_employee() {
        let employee = super::super::employee::Model {
            id: 1,
            user_id: 1,
            employee_number: 123456,
            first_name: "Ah".to_string(),
            last_name: "Tan".to_string(),
            salary: 2000,
            months_employed: 3,
            leave_balance: 14,
            department_id: 1,
        };
        assert_eq!(
            leave((2021, 1, 1), (2021, 1, 3)).describe(&employee),
            "Medical leave (2021-01-01 to 2021-01-03) for Ah"
        );
    }
}
