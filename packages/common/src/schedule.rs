//! Step-vesting schedule math.
//!
//! A schedule unlocks `managed_amount` in `periods` equal steps between
//! `start_time` and `end_time`. The per-period amount is truncated; the
//! remainder only becomes available once `end_time` has passed.
//!
//! All functions are pure. They assume a schedule that passed [`Schedule::validate`].

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Uint128};
use thiserror::Error;

use crate::hash::{u128_word, u64_word};

/// Whether the owner may reclaim unvested funds
#[cw_serde]
#[derive(Copy)]
pub enum Revocability {
    NotSet,
    Enabled,
    Disabled,
}

impl Revocability {
    /// Word encoding used in migration payloads
    pub fn to_u64(self) -> u64 {
        match self {
            Revocability::NotSet => 0,
            Revocability::Enabled => 1,
            Revocability::Disabled => 2,
        }
    }

    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            0 => Some(Revocability::NotSet),
            1 => Some(Revocability::Enabled),
            2 => Some(Revocability::Disabled),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Managed amount cannot be zero")]
    ZeroManagedAmount,

    #[error("Start time must be before end time")]
    InvalidTimeRange,

    #[error("Periods cannot be below minimum (1)")]
    InvalidPeriods,

    #[error("Period duration is zero: {periods} periods do not fit in {duration} seconds")]
    ZeroPeriodDuration { periods: u64, duration: u64 },

    #[error("Release start time must be before end time")]
    InvalidReleaseStart,

    #[error("Cliff time must be within the schedule window")]
    InvalidCliff,
}

/// Immutable lock schedule parameters
#[cw_serde]
pub struct Schedule {
    /// Total amount under management
    pub managed_amount: Uint128,
    /// Schedule start (unix seconds)
    pub start_time: u64,
    /// Schedule end (unix seconds)
    pub end_time: u64,
    /// Number of release steps
    pub periods: u64,
    /// Releases are blocked before this time (0 = no override)
    pub release_start_time: u64,
    /// Nothing vests before this time (0 = no cliff)
    pub vesting_cliff_time: u64,
    pub revocable: Revocability,
}

impl Schedule {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.managed_amount.is_zero() {
            return Err(ScheduleError::ZeroManagedAmount);
        }
        if self.start_time >= self.end_time {
            return Err(ScheduleError::InvalidTimeRange);
        }
        if self.periods < 1 {
            return Err(ScheduleError::InvalidPeriods);
        }
        if self.duration() < self.periods {
            return Err(ScheduleError::ZeroPeriodDuration {
                periods: self.periods,
                duration: self.duration(),
            });
        }
        if self.release_start_time > 0 && self.release_start_time >= self.end_time {
            return Err(ScheduleError::InvalidReleaseStart);
        }
        if self.vesting_cliff_time > 0
            && (self.vesting_cliff_time < self.start_time
                || self.vesting_cliff_time >= self.end_time)
        {
            return Err(ScheduleError::InvalidCliff);
        }
        Ok(())
    }

    pub fn duration(&self) -> u64 {
        self.end_time - self.start_time
    }

    /// Seconds since start, zero before start
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_time)
    }

    pub fn since_start(&self, now: u64) -> u64 {
        self.elapsed(now)
    }

    pub fn period_duration(&self) -> u64 {
        self.duration() / self.periods
    }

    /// 1-based period index; 1 before start
    pub fn current_period(&self, now: u64) -> u64 {
        self.elapsed(now) / self.period_duration() + 1
    }

    /// Completed periods, never more than `periods`
    pub fn passed_periods(&self, now: u64) -> u64 {
        (self.current_period(now) - 1).min(self.periods)
    }

    pub fn amount_per_period(&self) -> Uint128 {
        self.managed_amount / Uint128::from(self.periods)
    }

    /// Amount unlocked by the step schedule at `now`
    pub fn available_amount(&self, now: u64) -> Uint128 {
        if now < self.start_time {
            return Uint128::zero();
        }
        if now > self.end_time {
            return self.managed_amount;
        }
        self.amount_per_period() * Uint128::from(self.passed_periods(now))
    }

    /// Amount the owner can no longer reclaim at `now`
    pub fn vested_amount(&self, now: u64) -> Uint128 {
        if self.revocable == Revocability::Disabled {
            return self.managed_amount;
        }
        if self.cliff_pending(now) {
            return Uint128::zero();
        }
        self.available_amount(now)
    }

    /// Amount the beneficiary can release at `now`, bounded by what the
    /// instance actually holds.
    pub fn releasable_amount(
        &self,
        now: u64,
        released_amount: Uint128,
        current_balance: Uint128,
    ) -> StdResult<Uint128> {
        if self.release_start_time > 0 && now < self.release_start_time {
            return Ok(Uint128::zero());
        }
        if self.revocable == Revocability::Enabled && self.cliff_pending(now) {
            return Ok(Uint128::zero());
        }
        let releasable = self.available_amount(now).checked_sub(released_amount)?;
        Ok(current_balance.min(releasable))
    }

    /// Append the schedule as seven 32-byte words, in field order
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&u128_word(self.managed_amount.u128()));
        out.extend_from_slice(&u64_word(self.start_time));
        out.extend_from_slice(&u64_word(self.end_time));
        out.extend_from_slice(&u64_word(self.periods));
        out.extend_from_slice(&u64_word(self.release_start_time));
        out.extend_from_slice(&u64_word(self.vesting_cliff_time));
        out.extend_from_slice(&u64_word(self.revocable.to_u64()));
    }

    fn cliff_pending(&self, now: u64) -> bool {
        self.vesting_cliff_time > 0 && now < self.vesting_cliff_time
    }
}

/// Amount still owed to the beneficiary
pub fn total_outstanding(managed_amount: Uint128, released_amount: Uint128) -> StdResult<Uint128> {
    Ok(managed_amount.checked_sub(released_amount)?)
}

/// Balance held above what is still owed
pub fn surplus(current_balance: Uint128, total_outstanding: Uint128) -> Uint128 {
    current_balance.saturating_sub(total_outstanding)
}
