use bitfield::bitfield;

bitfield! {
    /// bitfields of CTRL_REG1 register
    #[derive(Clone, Copy, PartialEq)]
    pub struct CtrlReg1(u8);
    impl Debug;
    /// output data rate selection
    pub u8, dr, set_dr: 7, 6;
    /// bandwidth selection
    pub u8, bw, set_bw: 5, 4;
    /// true = normal mode, false = power down
    pub pd, set_pd: 3;
    /// enable Z axis
    pub zen, set_zen: 2;
    /// enable X axis
    pub xen, set_xen: 1;
    /// enable Y axis
    pub yen, set_yen: 0;
}

bitfield! {
    /// bitfields of CTRL_REG4 register
    #[derive(Clone, Copy, PartialEq)]
    pub struct CtrlReg4(u8);
    impl Debug;
    /// block data update: output registers not updated until MSB and LSB were read
    pub bdu, set_bdu: 7;
    /// big endian data selection
    pub ble, set_ble: 6;
    /// full scale selection
    pub u8, fs, set_fs: 5, 4;
    /// 3 wire SPI mode
    pub sim, set_sim: 0;
}

bitfield! {
    /// bitfields of STATUS_REG register
    #[derive(Clone, Copy, PartialEq)]
    pub struct StatusReg(u8);
    impl Debug;
    /// X, Y, Z axis data overrun
    pub zyxor, _: 7;
    /// Z axis data overrun
    pub zor, _: 6;
    /// Y axis data overrun
    pub yor, _: 5;
    /// X axis data overrun
    pub xor, _: 4;
    /// new X, Y, Z data available
    pub zyxda, _: 3;
    /// new Z data available
    pub zda, _: 2;
    /// new Y data available
    pub yda, _: 1;
    /// new X data available
    pub xda, _: 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l3gd20::{FullScale, CTRL_REG1_VAL, FULLSCALE_2000, FULLSCALE_500};

    #[test]
    fn default_ctrl_reg1_fields() {
        let reg = CtrlReg1(CTRL_REG1_VAL);
        assert_eq!(reg.dr(), 0b01);
        assert_eq!(reg.bw(), 0b10);
        assert!(reg.pd());
        assert!(reg.xen() && reg.yen() && reg.zen());
    }

    #[test]
    fn ctrl_reg4_fs_matches_constants() {
        let mut reg = CtrlReg4(0);
        reg.set_fs(0b01);
        assert_eq!(reg.0, FULLSCALE_500);
        reg.set_fs(0b10);
        assert_eq!(reg.0, FULLSCALE_2000);
        reg.set_bdu(true);
        assert_eq!(FullScale::from_ctrl_reg4(reg.0), FullScale::Dps2000);
    }

    #[test]
    fn status_flags() {
        let status = StatusReg(0b1000_1000);
        assert!(status.zyxor());
        assert!(status.zyxda());
        assert!(!status.xda());
        assert!(!status.zor());
    }
}
