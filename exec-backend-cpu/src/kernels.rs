use std::rc::Rc;

use exec_backend::{Error, Function, Result};
use exec_ir::OperandIndex;

use crate::builder::CpuTensorBuilder;

enum Binary {
    Add,
    Sub,
    Mul,
}

pub struct BinaryFunction {
    builder: Rc<CpuTensorBuilder>,
    op: Binary,
    lhs: OperandIndex,
    rhs: OperandIndex,
    out: OperandIndex,
}

impl BinaryFunction {
    fn new(builder: Rc<CpuTensorBuilder>, op: Binary, lhs: OperandIndex, rhs: OperandIndex, out: OperandIndex) -> Self {
        Self { builder, op, lhs, rhs, out }
    }

    pub fn add(builder: Rc<CpuTensorBuilder>, lhs: OperandIndex, rhs: OperandIndex, out: OperandIndex) -> Self {
        Self::new(builder, Binary::Add, lhs, rhs, out)
    }

    pub fn sub(builder: Rc<CpuTensorBuilder>, lhs: OperandIndex, rhs: OperandIndex, out: OperandIndex) -> Self {
        Self::new(builder, Binary::Sub, lhs, rhs, out)
    }

    pub fn mul(builder: Rc<CpuTensorBuilder>, lhs: OperandIndex, rhs: OperandIndex, out: OperandIndex) -> Self {
        Self::new(builder, Binary::Mul, lhs, rhs, out)
    }
}

impl Function for BinaryFunction {
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self) -> Result<()> {
        let lhs = self.builder.native_tensor(self.lhs).ok_or(Error::MissingTensor(self.lhs))?;
        let rhs = self.builder.native_tensor(self.rhs).ok_or(Error::MissingTensor(self.rhs))?;
        let out = self.builder.native_tensor(self.out).ok_or(Error::MissingTensor(self.out))?;
        let result: Vec<f32> = lhs
            .read_f32()
            .iter()
            .zip(rhs.read_f32().iter())
            .map(|(&a, &b)| match self.op {
                Binary::Add => a + b,
                Binary::Sub => a - b,
                Binary::Mul => a * b,
            })
            .collect();
        out.write_f32(&result);
        Ok(())
    }
}

pub struct ReluFunction {
    builder: Rc<CpuTensorBuilder>,
    input: OperandIndex,
    out: OperandIndex,
}

impl ReluFunction {
    pub fn new(builder: Rc<CpuTensorBuilder>, input: OperandIndex, out: OperandIndex) -> Self {
        Self { builder, input, out }
    }
}

impl Function for ReluFunction {
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self) -> Result<()> {
        let input = self.builder.native_tensor(self.input).ok_or(Error::MissingTensor(self.input))?;
        let out = self.builder.native_tensor(self.out).ok_or(Error::MissingTensor(self.out))?;
        let result: Vec<f32> = input.read_f32().iter().map(|&v| v.max(0.0)).collect();
        out.write_f32(&result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_function_sums_elementwise() {
        use exec_backend::TensorBuilder as _;
        use exec_tensor_abi::ElementType;

        let builder = Rc::new(CpuTensorBuilder::new());
        for (idx, values) in [(OperandIndex(0), vec![1.0, 2.0]), (OperandIndex(1), vec![3.0, 4.0]), (OperandIndex(2), vec![0.0, 0.0])] {
            builder.register_tensor_info(idx, exec_backend::OperandInfo {
                shape: vec![values.len()],
                element_type: ElementType::F32,
                is_constant: false,
                layout: exec_ir::Layout::Nhwc,
            }).unwrap();
            builder.native_tensor(idx).unwrap().write_f32(&values);
        }
        let function = BinaryFunction::add(builder.clone(), OperandIndex(0), OperandIndex(1), OperandIndex(2));
        function.run().unwrap();
        assert_eq!(builder.native_tensor(OperandIndex(2)).unwrap().read_f32(), vec![4.0, 6.0]);
    }
}
