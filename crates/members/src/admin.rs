//! Admin approval workflow.
//!
//! Every operation validates its entitlement first; a denial aborts before
//! any store write or outbound email. Notification failures never roll back
//! an already-committed decision — they are logged and dropped.

use std::sync::Arc;

use chrono::Utc;

use memberbase_auth::{EntitlementCheckRequest, EntitlementEngine, Identity, Role};
use memberbase_comm::{CommunicationRequest, CommunicationService, CommunicationStage};
use memberbase_core::{MemberId, MemberStatus};
use serde::Deserialize;

use crate::error::MembersError;
use crate::member::Member;
use crate::repository::MemberRepository;

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Upper bound on concurrent ADMIN grants.
    pub max_admins: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { max_admins: 5 }
    }
}

pub struct AdminService {
    members: Arc<dyn MemberRepository>,
    engine: Arc<EntitlementEngine>,
    comm: Arc<CommunicationService>,
    config: AdminConfig,
}

impl AdminService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        engine: Arc<EntitlementEngine>,
        comm: Arc<CommunicationService>,
        config: AdminConfig,
    ) -> Self {
        Self {
            members,
            engine,
            comm,
            config,
        }
    }

    /// Approve a pending member and notify them.
    pub async fn confirm_member(
        &self,
        identity: Option<&Identity>,
        email: &str,
    ) -> Result<Member, MembersError> {
        tracing::info!(email, "confirming member");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let mut member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))?;

        member.confirm(Utc::now())?;
        let member = self.members.save(member).await?;
        tracing::info!(member = %member.id, "member confirmed");

        self.notify(&member, CommunicationStage::Approval).await;
        Ok(member)
    }

    /// Reject a pending member and notify them.
    pub async fn reject_member(
        &self,
        identity: Option<&Identity>,
        email: &str,
    ) -> Result<Member, MembersError> {
        tracing::info!(email, "rejecting member");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let mut member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))?;

        member.reject(Utc::now())?;
        let member = self.members.save(member).await?;
        tracing::info!(member = %member.id, "member rejected");

        self.notify(&member, CommunicationStage::Rejection).await;
        Ok(member)
    }

    /// Grant `role` to the member behind `email`.
    ///
    /// The entitlement engine decides whether the *caller* may grant the
    /// role; the target must exist and be confirmed.
    pub async fn add_role(
        &self,
        identity: Option<&Identity>,
        email: &str,
        role: Role,
    ) -> Result<Member, MembersError> {
        tracing::info!(email, %role, "assigning role");
        self.engine
            .validate(&EntitlementCheckRequest::AssignRole { role }, identity)
            .await?;

        let mut member = self
            .members
            .find_by_email(email)
            .await?
            .filter(Member::is_confirmed)
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))?;

        if member.add_role(role, Utc::now()) {
            member = self.members.save(member).await?;
            tracing::info!(member = %member.id, %role, "role assigned");
        }
        Ok(member)
    }

    /// Promote a member to ADMIN, respecting the configured head-count cap.
    pub async fn grant_admin(
        &self,
        identity: Option<&Identity>,
        member_id: MemberId,
    ) -> Result<Member, MembersError> {
        tracing::info!(member = %member_id, "granting ADMIN role");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let mut member = self
            .members
            .find_by_id(&member_id)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(member_id.to_string()))?;

        if member.has_role(Role::Admin) {
            tracing::warn!(member = %member_id, "member already has ADMIN role");
            return Err(MembersError::AlreadyAdmin);
        }

        let admins = self.members.count_with_role(Role::Admin).await?;
        if admins as usize >= self.config.max_admins {
            tracing::warn!(admins, cap = self.config.max_admins, "admin cap reached");
            return Err(MembersError::AdminThreshold(self.config.max_admins));
        }

        member.add_role(Role::Admin, Utc::now());
        let member = self.members.save(member).await?;
        tracing::info!(member = %member.id, "ADMIN role granted");
        Ok(member)
    }

    /// Paged listing of members in one status.
    pub async fn members_by_status(
        &self,
        identity: Option<&Identity>,
        status: MemberStatus,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Member>, u64), MembersError> {
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let members = self.members.find_by_status(status, offset, limit).await?;
        let total = self.members.count_by_status(status).await?;
        Ok((members, total))
    }

    async fn notify(&self, member: &Member, stage: CommunicationStage) {
        let request = CommunicationRequest::new(member.email.clone(), stage)
            .with_variable("username", member.first_name.clone());

        if let Err(err) = self.comm.send(&request).await {
            tracing::warn!(member = %member.id, %stage, error = %err, "notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use memberbase_comm::{
        CommError, CommunicationConfig, Mailer, OutboundEmail, StageTemplateProvider,
    };

    use crate::member::testing::{confirmed, pending};
    use crate::repository::testing::StubMembers;

    use super::*;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    impl RecordingMailer {
        fn sent(&self) -> Vec<OutboundEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<(), CommError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<StubMembers>,
        mailer: Arc<RecordingMailer>,
        service: AdminService,
        admin: Identity,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(StubMembers::default());
        let mailer = Arc::new(RecordingMailer::default());

        let caller = confirmed("root@example.com", vec![Role::Member, Role::Admin]);
        let admin = Identity::new(caller.id, caller.roles.clone());
        store.insert(caller);

        let engine = Arc::new(EntitlementEngine::with_default_checks(
            Arc::clone(&store) as _,
        ));
        let comm = Arc::new(CommunicationService::new(
            vec![Arc::new(StageTemplateProvider::new(
                CommunicationConfig::default(),
            ))],
            Arc::clone(&mailer) as _,
        ));

        let service = AdminService::new(
            Arc::clone(&store) as _,
            engine,
            comm,
            AdminConfig { max_admins: 2 },
        );

        Fixture {
            store,
            mailer,
            service,
            admin,
        }
    }

    #[tokio::test]
    async fn confirmation_updates_status_and_sends_approval_mail() {
        let f = fixture();
        f.store.insert(pending("new@example.com"));

        let member = f
            .service
            .confirm_member(Some(&f.admin), "new@example.com")
            .await
            .unwrap();

        assert_eq!(member.status, MemberStatus::Confirmed);
        assert!(member.registered_since.is_some());

        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "new@example.com");
        assert!(sent[0].body.contains("approved"));
    }

    #[tokio::test]
    async fn rejection_updates_status_and_sends_rejection_mail() {
        let f = fixture();
        f.store.insert(pending("new@example.com"));

        let member = f
            .service
            .reject_member(Some(&f.admin), "new@example.com")
            .await
            .unwrap();

        assert_eq!(member.status, MemberStatus::Rejected);
        assert_eq!(f.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn denied_entitlement_aborts_before_any_side_effect() {
        let f = fixture();
        let target = pending("new@example.com");
        let target_id = target.id;
        f.store.insert(target);

        // Token claims ADMIN, but storage knows nothing of this caller.
        let stale = Identity::new(MemberId::new(), vec![Role::Member, Role::Admin]);

        let err = f
            .service
            .confirm_member(Some(&stale), "new@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, MembersError::Auth(_)));

        // Neither the status nor the outbox moved.
        assert_eq!(
            f.store.get(&target_id).unwrap().status,
            MemberStatus::Pending
        );
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn confirming_a_non_pending_member_fails_and_sends_nothing() {
        let f = fixture();
        f.store
            .insert(confirmed("done@example.com", vec![Role::Member]));

        let err = f
            .service
            .confirm_member(Some(&f.admin), "done@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, MembersError::NotPending(_)));
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn admin_can_assign_finance_to_a_confirmed_member() {
        let f = fixture();
        f.store
            .insert(confirmed("worker@example.com", vec![Role::Member]));

        let member = f
            .service
            .add_role(Some(&f.admin), "worker@example.com", Role::Finance)
            .await
            .unwrap();

        assert!(member.has_role(Role::Finance));
    }

    #[tokio::test]
    async fn plain_member_cannot_assign_finance() {
        let f = fixture();
        let caller = confirmed("plain@example.com", vec![Role::Member]);
        let identity = Identity::new(caller.id, caller.roles.clone());
        f.store.insert(caller);
        f.store
            .insert(confirmed("worker@example.com", vec![Role::Member]));

        let err = f
            .service
            .add_role(Some(&identity), "worker@example.com", Role::Finance)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MembersError::Auth(memberbase_auth::AuthError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn role_assignment_requires_a_confirmed_target() {
        let f = fixture();
        f.store.insert(pending("new@example.com"));

        let err = f
            .service
            .add_role(Some(&f.admin), "new@example.com", Role::Finance)
            .await
            .unwrap_err();

        assert!(matches!(err, MembersError::MemberNotFound(_)));
    }

    #[tokio::test]
    async fn admin_grant_respects_the_head_count_cap() {
        let f = fixture();

        let second = confirmed("second@example.com", vec![Role::Member]);
        let second_id = second.id;
        f.store.insert(second);
        f.service
            .grant_admin(Some(&f.admin), second_id)
            .await
            .unwrap();

        // Cap is 2 and both slots are taken now.
        let third = confirmed("third@example.com", vec![Role::Member]);
        let third_id = third.id;
        f.store.insert(third);
        let err = f
            .service
            .grant_admin(Some(&f.admin), third_id)
            .await
            .unwrap_err();
        assert!(matches!(err, MembersError::AdminThreshold(2)));
    }

    #[tokio::test]
    async fn double_admin_grant_is_refused() {
        let f = fixture();
        let target = confirmed("other@example.com", vec![Role::Member, Role::Admin]);
        let target_id = target.id;
        f.store.insert(target);

        let err = f
            .service
            .grant_admin(Some(&f.admin), target_id)
            .await
            .unwrap_err();
        assert!(matches!(err, MembersError::AlreadyAdmin));
    }

    #[tokio::test]
    async fn status_listing_pages_and_counts() {
        let f = fixture();
        for i in 0..3 {
            f.store.insert(pending(&format!("p{i}@example.com")));
        }

        let (page, total) = f
            .service
            .members_by_status(Some(&f.admin), MemberStatus::Pending, 0, 2)
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(total, 3);
    }
}
