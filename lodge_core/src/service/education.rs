use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{DatabaseTransaction, DbBackend};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    entity::prelude::*,
    ids::{CourseId, MemberId},
    visibility::{Gated, Viewer},
};

const RECENT_MATERIALS: u64 = 6;
const LIBRARY_SAMPLE: usize = 8;

#[derive(Debug, Error)]
pub enum EducationServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("course not found")]
    CourseNotFound,

    #[error("member not found")]
    MemberNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
    CourseFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveOutcome {
    Left,
    NotEnrolled,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceCourses {
    pub audience: Audience,
    pub courses: Vec<CourseModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: CourseModel,
    pub materials: Vec<MaterialModel>,
    pub enrolled: u64,
    pub viewer_enrolled: bool,
}

impl CourseDetail {
    pub fn seats_left(&self) -> Option<u64> {
        (self.course.capacity > 0)
            .then(|| (self.course.capacity as u64).saturating_sub(self.enrolled))
    }
}

const AUDIENCES: [Audience; 4] = [
    Audience::Apprentice,
    Audience::Fellow,
    Audience::Master,
    Audience::All,
];

#[derive(Clone)]
pub struct EducationService {
    db: DatabaseConnection,
}

impl EducationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Visible courses grouped by the degree they are meant for.
    pub async fn courses_by_audience(
        &self,
        viewer: Viewer,
    ) -> Result<Vec<AudienceCourses>, EducationServiceError> {
        let courses = Course::find_visible(viewer)
            .order_by_asc(CourseColumn::SortOrder)
            .order_by_asc(CourseColumn::Title)
            .all(&self.db)
            .await?;

        Ok(AUDIENCES
            .into_iter()
            .map(|audience| AudienceCourses {
                audience,
                courses: courses
                    .iter()
                    .filter(|course| course.audience == audience)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    /// An active course by id, whatever its audience flags.
    pub async fn active_course(&self, id: CourseId) -> Result<CourseModel, EducationServiceError> {
        Course::find_by_id(id)
            .filter(CourseColumn::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(EducationServiceError::CourseNotFound)
    }

    pub async fn course_detail(
        &self,
        slug: &str,
        viewer: Viewer,
        member: Option<MemberId>,
    ) -> Result<CourseDetail, EducationServiceError> {
        let course = Course::find_visible(viewer)
            .filter(CourseColumn::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(EducationServiceError::CourseNotFound)?;

        let materials = Material::visible_to(course.find_related(Material), viewer)
            .order_by_asc(MaterialColumn::SortOrder)
            .all(&self.db)
            .await?;

        let enrolled = enrollment_count(&self.db, course.id).await?;
        let viewer_enrolled = match member {
            Some(member) => CourseEnrollment::find_by_id((course.id, member))
                .one(&self.db)
                .await?
                .is_some(),
            None => false,
        };

        Ok(CourseDetail {
            course,
            materials,
            enrolled,
            viewer_enrolled,
        })
    }

    /// Enrolls `member` in `course` unless already enrolled or full.
    ///
    /// The association is inserted before counting inside one transaction,
    /// so two members racing for the last seat cannot both get it.
    pub async fn enroll(
        &self,
        member: MemberId,
        course: CourseId,
    ) -> Result<EnrollOutcome, EducationServiceError> {
        let txn = self.db.begin().await?;
        let course = lock_active_course(&txn, course).await?;

        if Member::find_by_id(member).one(&txn).await?.is_none() {
            return Err(EducationServiceError::MemberNotFound);
        }

        if CourseEnrollment::find_by_id((course.id, member))
            .one(&txn)
            .await?
            .is_some()
        {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        CourseEnrollmentActiveModel {
            course_id: Set(course.id),
            member_id: Set(member),
            enrolled_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        if course.capacity > 0 {
            let enrolled = enrollment_count(&txn, course.id).await?;
            if enrolled > course.capacity as u64 {
                txn.rollback().await?;
                debug!(course = %course.slug, "course full");
                return Ok(EnrollOutcome::CourseFull);
            }
        }

        txn.commit().await?;
        info!(course = %course.slug, member = %member, "member enrolled");
        Ok(EnrollOutcome::Enrolled)
    }

    pub async fn leave(
        &self,
        member: MemberId,
        course: CourseId,
    ) -> Result<LeaveOutcome, EducationServiceError> {
        let course = self.active_course(course).await?;

        let removed = CourseEnrollment::delete_by_id((course.id, member))
            .exec(&self.db)
            .await?;

        if removed.rows_affected == 0 {
            return Ok(LeaveOutcome::NotEnrolled);
        }

        info!(course = %course.slug, member = %member, "member left course");
        Ok(LeaveOutcome::Left)
    }

    pub async fn recent_materials(
        &self,
        viewer: Viewer,
    ) -> Result<Vec<MaterialModel>, EducationServiceError> {
        Ok(Material::find_visible(viewer)
            .order_by_desc(MaterialColumn::Id)
            .limit(RECENT_MATERIALS)
            .all(&self.db)
            .await?)
    }

    /// A random handful of library items the viewer may see.
    pub async fn library_sample(
        &self,
        viewer: Viewer,
    ) -> Result<Vec<LibraryItemModel>, EducationServiceError> {
        let mut items = LibraryItem::find_visible(viewer).all(&self.db).await?;
        items.shuffle(&mut rand::rng());
        items.truncate(LIBRARY_SAMPLE);
        Ok(items)
    }

    /// Active courses the member is enrolled in.
    pub async fn member_courses(
        &self,
        member: MemberId,
    ) -> Result<Vec<CourseModel>, EducationServiceError> {
        let course_ids: Vec<CourseId> = CourseEnrollment::find()
            .select_only()
            .column(CourseEnrollmentColumn::CourseId)
            .filter(CourseEnrollmentColumn::MemberId.eq(member))
            .into_tuple()
            .all(&self.db)
            .await?;

        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(Course::find()
            .filter(CourseColumn::IsActive.eq(true))
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_asc(CourseColumn::SortOrder)
            .all(&self.db)
            .await?)
    }
}

async fn lock_active_course(
    txn: &DatabaseTransaction,
    id: CourseId,
) -> Result<CourseModel, EducationServiceError> {
    let mut query = Course::find_by_id(id).filter(CourseColumn::IsActive.eq(true));
    if txn.get_database_backend() != DbBackend::Sqlite {
        query = query.lock_exclusive();
    }
    query
        .one(txn)
        .await?
        .ok_or(EducationServiceError::CourseNotFound)
}

async fn enrollment_count<C: ConnectionTrait>(db: &C, course: CourseId) -> Result<u64, DbErr> {
    CourseEnrollment::find()
        .filter(CourseEnrollmentColumn::CourseId.eq(course))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> EducationService {
        EducationService::new(test_utils::setup_test_db().await)
    }

    #[tokio::test]
    async fn test_enroll_then_already_enrolled() {
        let service = setup_test_service().await;
        let course = test_utils::course("intro").insert(&service.db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;

        let first = service.enroll(member.id, course.id).await.unwrap();
        let second = service.enroll(member.id, course.id).await.unwrap();

        assert_eq!(first, EnrollOutcome::Enrolled);
        assert_eq!(second, EnrollOutcome::AlreadyEnrolled);
        assert_eq!(enrollment_count(&service.db, course.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_enroll_respects_capacity() {
        let service = setup_test_service().await;
        let mut course = test_utils::course("cupo");
        course.capacity = Set(1);
        let course = course.insert(&service.db).await.unwrap();
        let first = test_utils::insert_member_with_rank(&service.db, "Uno", 1).await;
        let second = test_utils::insert_member_with_rank(&service.db, "Dos", 1).await;

        assert_eq!(
            service.enroll(first.id, course.id).await.unwrap(),
            EnrollOutcome::Enrolled
        );
        assert_eq!(
            service.enroll(second.id, course.id).await.unwrap(),
            EnrollOutcome::CourseFull
        );
        assert_eq!(enrollment_count(&service.db, course.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_unlimited() {
        let service = setup_test_service().await;
        let course = test_utils::course("abierto").insert(&service.db).await.unwrap();

        for n in 0..5 {
            let member =
                test_utils::insert_member_with_rank(&service.db, &format!("H{n}"), 1).await;
            assert_eq!(
                service.enroll(member.id, course.id).await.unwrap(),
                EnrollOutcome::Enrolled
            );
        }
    }

    #[tokio::test]
    async fn test_enroll_in_inactive_course_is_not_found() {
        let service = setup_test_service().await;
        let mut course = test_utils::course("cerrado");
        course.is_active = Set(false);
        let course = course.insert(&service.db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;

        assert!(matches!(
            service.enroll(member.id, course.id).await,
            Err(EducationServiceError::CourseNotFound)
        ));
        assert!(matches!(
            service.active_course(course.id).await,
            Err(EducationServiceError::CourseNotFound)
        ));
    }

    #[tokio::test]
    async fn test_enroll_unknown_member() {
        let service = setup_test_service().await;
        let course = test_utils::course("intro").insert(&service.db).await.unwrap();

        assert!(matches!(
            service.enroll(MemberId::new(), course.id).await,
            Err(EducationServiceError::MemberNotFound)
        ));
    }

    #[tokio::test]
    async fn test_leave_course() {
        let service = setup_test_service().await;
        let course = test_utils::course("intro").insert(&service.db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;
        service.enroll(member.id, course.id).await.unwrap();

        assert_eq!(
            service.leave(member.id, course.id).await.unwrap(),
            LeaveOutcome::Left
        );
        assert_eq!(
            service.leave(member.id, course.id).await.unwrap(),
            LeaveOutcome::NotEnrolled
        );
    }

    #[tokio::test]
    async fn test_course_detail() {
        let service = setup_test_service().await;
        let mut course = test_utils::course("simbolismo");
        course.capacity = Set(10);
        let course = course.insert(&service.db).await.unwrap();
        test_utils::material("Lectura", Some(course.id))
            .insert(&service.db)
            .await
            .unwrap();
        let mut private = test_utils::material("Ritual", Some(course.id));
        private.members_only = Set(true);
        private.insert(&service.db).await.unwrap();
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;
        service.enroll(member.id, course.id).await.unwrap();

        let public = service
            .course_detail("simbolismo", Viewer::Public, None)
            .await
            .unwrap();
        assert_eq!(public.materials.len(), 1);
        assert_eq!(public.enrolled, 1);
        assert_eq!(public.seats_left(), Some(9));
        assert!(!public.viewer_enrolled);

        let own = service
            .course_detail("simbolismo", Viewer::Member, Some(member.id))
            .await
            .unwrap();
        assert_eq!(own.materials.len(), 2);
        assert!(own.viewer_enrolled);
    }

    #[tokio::test]
    async fn test_members_only_course_hidden_from_public() {
        let service = setup_test_service().await;
        let mut course = test_utils::course("maestria");
        course.members_only = Set(true);
        course.insert(&service.db).await.unwrap();

        assert!(matches!(
            service.course_detail("maestria", Viewer::Public, None).await,
            Err(EducationServiceError::CourseNotFound)
        ));
        assert!(service
            .course_detail("maestria", Viewer::Member, None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_courses_grouped_by_audience() {
        let service = setup_test_service().await;
        let mut apprentice = test_utils::course("aprendiz");
        apprentice.audience = Set(Audience::Apprentice);
        apprentice.insert(&service.db).await.unwrap();
        let mut master = test_utils::course("maestro");
        master.audience = Set(Audience::Master);
        master.insert(&service.db).await.unwrap();

        let groups = service.courses_by_audience(Viewer::Public).await.unwrap();

        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].audience, Audience::Apprentice);
        assert_eq!(groups[0].courses.len(), 1);
        assert!(groups[1].courses.is_empty());
        assert_eq!(groups[2].courses[0].slug, "maestro");
    }

    #[tokio::test]
    async fn test_library_sample_is_capped() {
        let service = setup_test_service().await;
        for n in 0..10 {
            test_utils::library_item(&format!("Libro {n}"))
                .insert(&service.db)
                .await
                .unwrap();
        }
        let mut lent = test_utils::library_item("Prestado");
        lent.is_available = Set(false);
        lent.insert(&service.db).await.unwrap();

        let sample = service.library_sample(Viewer::Public).await.unwrap();

        assert_eq!(sample.len(), 8);
        assert!(sample.iter().all(|item| item.is_available));
    }

    #[tokio::test]
    async fn test_member_courses_skip_inactive() {
        let service = setup_test_service().await;
        let member = test_utils::insert_member_with_rank(&service.db, "Juan", 1).await;
        let kept = test_utils::course("activo").insert(&service.db).await.unwrap();
        let closed = test_utils::course("cerrado").insert(&service.db).await.unwrap();
        service.enroll(member.id, kept.id).await.unwrap();
        service.enroll(member.id, closed.id).await.unwrap();

        let mut closing: CourseActiveModel = closed.into();
        closing.is_active = Set(false);
        closing.update(&service.db).await.unwrap();

        let courses = service.member_courses(member.id).await.unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].slug, "activo");
    }
}
