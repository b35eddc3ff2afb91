use crate::reconcile::RemoteSnapshot;

// Wire messages for the remote-save backend. The contract is
// deliberately narrow: read one record by user id, upsert one record
// by user id. Nothing here assumes a particular backend behind the
// socket.

#[derive(Debug, Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub enum ClientMsg {
    SaveProgress {
        user_id: String,
        snapshot: RemoteSnapshot,
    },
    LoadProgress {
        user_id: String,
    },
    Ping {
        nonce: Option<u64>,
    },
}

#[derive(Debug, Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub enum ServerMsg {
    /// Response to `LoadProgress`; `snapshot` is `None` for a user
    /// with no remote record yet.
    Progress {
        user_id: String,
        snapshot: Option<RemoteSnapshot>,
    },
    Saved {
        user_id: String,
    },
    Pong {
        nonce: Option<u64>,
    },
    Error {
        code: String,
        message: String,
    },
}
